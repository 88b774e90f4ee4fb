use serde::{Deserialize, Serialize};

/// Number of job postings requested per page
pub const PAGE_SIZE: u32 = 6;

/// A single job posting as listed by the job service
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct JobSummary {
    #[serde(rename = "_id", alias = "id")]
    id: String,
    title: String,
    company: String,
    location: String,
    description: String,
}

impl JobSummary {
    pub fn new(
        id: String,
        title: String,
        company: String,
        location: String,
        description: String,
    ) -> Self {
        Self {
            id,
            title,
            company,
            location,
            description,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn company(&self) -> &str {
        &self.company
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// One page of the job listing, together with the total page count
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct JobPage {
    pub jobs: Vec<JobSummary>,
    pub total_pages: u32,
}

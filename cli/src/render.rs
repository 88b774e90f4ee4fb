use std::io::Write;

use job_board::view::{detail_path, JobCard, PaginationView};
use job_board::JobSummary;

const DESCRIPTION_CHARS: usize = 160;

fn clamp_description(description: &str, max_chars: usize) -> String {
    let description = description.split_whitespace().collect::<Vec<_>>().join(" ");
    if description.chars().count() <= max_chars {
        return description;
    }
    let mut clamped = description.chars().take(max_chars).collect::<String>();
    clamped.push('…');
    clamped
}

fn detail_url(base_url: &str, detail_path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), detail_path)
}

fn write_job<W: Write>(
    out: &mut W,
    position: usize,
    job: &JobSummary,
    favorited: bool,
    url: &str,
) -> std::io::Result<()> {
    let marker = if favorited { "♥" } else { "♡" };
    writeln!(out, "{:>2}. {} {}", position, marker, job.title())?;
    writeln!(out, "    {} · {}", job.company(), job.location())?;
    if !job.description().trim().is_empty() {
        writeln!(out, "    {}", clamp_description(job.description(), DESCRIPTION_CHARS))?;
    }
    writeln!(out, "    {}", url)
}

pub fn page<W: Write>(
    out: &mut W,
    cards: &[JobCard<'_>],
    pagination: PaginationView,
    base_url: &str,
) -> std::io::Result<()> {
    writeln!(out)?;
    if cards.is_empty() {
        writeln!(out, "No jobs on this page")?;
    }
    for (i, card) in cards.iter().enumerate() {
        let url = detail_url(base_url, &card.detail_path);
        write_job(out, i + 1, card.job, card.favorited, &url)?;
    }
    let previous = if pagination.previous_disabled { "  -  " } else { "[p]rev" };
    let next = if pagination.next_disabled { "  -  " } else { "[n]ext" };
    writeln!(out, "{}   {}   {}", previous, pagination, next)
}

pub fn favorites<W: Write>(out: &mut W, jobs: &[JobSummary], base_url: &str) -> std::io::Result<()> {
    if jobs.is_empty() {
        return writeln!(out, "No favorite jobs yet");
    }
    writeln!(out, "{} favorite jobs", jobs.len())?;
    for (i, job) in jobs.iter().enumerate() {
        let url = detail_url(base_url, &detail_path(job.id()));
        write_job(out, i + 1, job, true, &url)?;
    }
    Ok(())
}

pub fn help<W: Write>(out: &mut W) -> std::io::Result<()> {
    writeln!(out, "commands: n(ext), p(rev), g <page>, f <n> toggle favorite, favs, r(eload), h(elp), q(uit)")
}

//! Resume data and rendering.
//!
//! `resume.json` follows the usual JSON-Resume field names. Rendering
//! produces semantic [`DocLine`]s; the view decides colors, and `export`
//! writes the same lines as plain text.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Resume {
    pub basics: Basics,
    pub experience: Vec<Job>,
    pub projects: Vec<Project>,
    pub skills: Vec<String>,
    pub education: Vec<School>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Basics {
    pub name: String,
    pub label: String,
    pub email: String,
    pub url: String,
    pub summary: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Job {
    pub position: String,
    pub company: String,
    pub start_date: String,
    pub end_date: String,
    pub summary: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub name: String,
    pub url: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct School {
    pub institution: String,
    pub study_type: String,
    pub area: String,
    pub start_date: String,
    pub end_date: String,
}

/// Semantic role of a rendered line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocLineKind {
    /// The person's name.
    Title,
    /// Section headers (Experience, Projects, ...).
    Section,
    /// Role/project/institution lines.
    Emphasis,
    Body,
    /// Dates, contact details, skill tags.
    Meta,
    Blank,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocLine {
    pub kind: DocLineKind,
    pub text: String,
}

impl DocLine {
    fn new(kind: DocLineKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    fn blank() -> Self {
        Self::new(DocLineKind::Blank, "")
    }
}

pub fn load(path: &Path) -> anyhow::Result<Resume> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("could not read {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("invalid resume data in {}", path.display()))
}

/// Render the resume into styled lines. Empty sections are omitted.
pub fn render(resume: &Resume) -> Vec<DocLine> {
    let mut lines = Vec::new();
    let basics = &resume.basics;

    if !basics.name.is_empty() {
        lines.push(DocLine::new(DocLineKind::Title, &basics.name));
    }
    if !basics.label.is_empty() {
        lines.push(DocLine::new(DocLineKind::Emphasis, &basics.label));
    }
    let mut contact = Vec::new();
    if !basics.email.is_empty() {
        contact.push(format!("Email: {}", basics.email));
    }
    if !basics.url.is_empty() {
        contact.push(format!("Web: {}", strip_scheme(&basics.url)));
    }
    if !contact.is_empty() {
        lines.push(DocLine::new(DocLineKind::Meta, contact.join("   ")));
    }
    if !basics.summary.is_empty() {
        lines.push(DocLine::blank());
        lines.push(DocLine::new(DocLineKind::Body, &basics.summary));
    }

    if !resume.experience.is_empty() {
        push_section(&mut lines, "Experience");
        for job in &resume.experience {
            lines.push(DocLine::new(
                DocLineKind::Emphasis,
                format!("{} @ {}", job.position, job.company),
            ));
            lines.push(DocLine::new(
                DocLineKind::Meta,
                format!("{} - {}", job.start_date, job.end_date),
            ));
            if !job.summary.is_empty() {
                lines.push(DocLine::new(DocLineKind::Body, &job.summary));
            }
            lines.push(DocLine::blank());
        }
    }

    if !resume.projects.is_empty() {
        push_section(&mut lines, "Projects");
        for project in &resume.projects {
            let heading = if project.url.is_empty() {
                project.name.clone()
            } else {
                format!("{} ({})", project.name, strip_scheme(&project.url))
            };
            lines.push(DocLine::new(DocLineKind::Emphasis, heading));
            if !project.description.is_empty() {
                lines.push(DocLine::new(DocLineKind::Body, &project.description));
            }
            lines.push(DocLine::blank());
        }
    }

    if !resume.skills.is_empty() {
        push_section(&mut lines, "Skills");
        lines.push(DocLine::new(
            DocLineKind::Meta,
            resume
                .skills
                .iter()
                .map(|s| format!("[{s}]"))
                .collect::<Vec<_>>()
                .join(" "),
        ));
        lines.push(DocLine::blank());
    }

    if !resume.education.is_empty() {
        push_section(&mut lines, "Education");
        for school in &resume.education {
            lines.push(DocLine::new(DocLineKind::Emphasis, &school.institution));
            lines.push(DocLine::new(
                DocLineKind::Body,
                format!("{} in {}", school.study_type, school.area),
            ));
            lines.push(DocLine::new(
                DocLineKind::Meta,
                format!("{} - {}", school.start_date, school.end_date),
            ));
            lines.push(DocLine::blank());
        }
    }

    while lines.last().is_some_and(|l| l.kind == DocLineKind::Blank) {
        lines.pop();
    }
    lines
}

/// The exported plain-text form: section headers get underlines, the rest
/// is the line text as rendered.
pub fn export_text(lines: &[DocLine]) -> String {
    let mut out = String::new();
    for line in lines {
        out.push_str(&line.text);
        out.push('\n');
        if line.kind == DocLineKind::Section {
            out.push_str(&"-".repeat(line.text.len()));
            out.push('\n');
        }
    }
    out
}

fn push_section(lines: &mut Vec<DocLine>, title: &str) {
    if lines.last().is_some_and(|l| l.kind != DocLineKind::Blank) {
        lines.push(DocLine::blank());
    }
    lines.push(DocLine::new(DocLineKind::Section, title));
    lines.push(DocLine::blank());
}

fn strip_scheme(url: &str) -> &str {
    url.strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url)
}

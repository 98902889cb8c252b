//! Built-in mock datasets and JSON catalog files.
//!
//! The built-in catalog is the static pool used for recruiters and the
//! fallback pool for job seekers when the ranking service is unavailable.
//!
//! Catalog file format:
//! ```json
//! { "candidates": [ { "id": "1", "name": "...", ... } ],
//!   "jobs":       [ { "id": "1", "title": "...", "company": "...", ... } ] }
//! ```

use crate::error::{CatalogError, Result};
use crate::index::Catalog;
use crate::types::{CandidateProfile, JobOffer};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    candidates: Vec<CandidateProfile>,
    #[serde(default)]
    jobs: Vec<JobOffer>,
}

impl Catalog {
    /// The built-in mock catalog: 8 candidates and 8 job offers, ids "1".."8".
    pub fn builtin() -> Self {
        let mut catalog = Catalog::new();
        for candidate in builtin_candidates() {
            if let Err(e) = catalog.insert_candidate(candidate) {
                debug_assert!(false, "built-in candidates: {e}");
            }
        }
        for job in builtin_jobs() {
            if let Err(e) = catalog.insert_job(job) {
                debug_assert!(false, "built-in jobs: {e}");
            }
        }
        catalog
    }

    /// Load a catalog from a JSON file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let file = path.display().to_string();
        if !path.exists() {
            return Err(CatalogError::FileNotFound { path: file });
        }
        let content = fs::read_to_string(path)?;
        Self::from_json(&content).map_err(|e| match e {
            CatalogError::ParseError { reason, .. } => CatalogError::ParseError { file, reason },
            other => other,
        })
    }

    /// Parse a catalog from a JSON document.
    pub fn from_json(content: &str) -> Result<Self> {
        let parsed: CatalogFile =
            serde_json::from_str(content).map_err(|e| CatalogError::ParseError {
                file: "<inline>".to_string(),
                reason: e.to_string(),
            })?;

        let mut catalog = Catalog::new();
        for candidate in parsed.candidates {
            catalog.insert_candidate(candidate)?;
        }
        for job in parsed.jobs {
            catalog.insert_job(job)?;
        }
        Ok(catalog)
    }
}

fn candidate(
    id: &str,
    name: &str,
    photo: u8,
    skills: &[&str],
    experience: &str,
    location: &str,
    bio: &str,
) -> CandidateProfile {
    CandidateProfile {
        id: id.to_string(),
        name: name.to_string(),
        photo: format!("https://i.pravatar.cc/300?img={photo}"),
        skills: skills.iter().map(|s| s.to_string()).collect(),
        experience: experience.to_string(),
        location: location.to_string(),
        bio: bio.to_string(),
    }
}

fn job(
    id: &str,
    title: &str,
    company: &str,
    location: &str,
    skills: &[&str],
    description: &str,
    salary: &str,
    logo: &str,
) -> JobOffer {
    JobOffer {
        id: id.to_string(),
        title: title.to_string(),
        company: company.to_string(),
        location: location.to_string(),
        required_skills: skills.iter().map(|s| s.to_string()).collect(),
        description: description.to_string(),
        salary: Some(salary.to_string()),
        logo: Some(logo.to_string()),
        ..Default::default()
    }
}

/// Mock candidate profiles shown to recruiters
pub fn builtin_candidates() -> Vec<CandidateProfile> {
    vec![
        candidate(
            "1",
            "Sophie Martin",
            1,
            &["React", "TypeScript", "Node.js", "MongoDB"],
            "5 years",
            "Paris, France",
            "Full-stack developer who enjoys modern tooling and intuitive interfaces.",
        ),
        candidate(
            "2",
            "Lucas Dubois",
            12,
            &["Python", "Django", "PostgreSQL", "Docker"],
            "3 years",
            "Lyon, France",
            "Backend engineer with solid experience in scalable architectures.",
        ),
        candidate(
            "3",
            "Emma Bernard",
            5,
            &["Vue.js", "Nuxt.js", "GraphQL", "AWS"],
            "4 years",
            "Toulouse, France",
            "Frontend developer focused on JavaScript frameworks and design systems.",
        ),
        candidate(
            "4",
            "Thomas Leroy",
            20,
            &["Java", "Spring Boot", "Kubernetes", "Microservices"],
            "6 years",
            "Nantes, France",
            "Software architect working on distributed systems and cloud platforms.",
        ),
        candidate(
            "5",
            "Léa Moreau",
            9,
            &["React Native", "Flutter", "Firebase", "CI/CD"],
            "3 years",
            "Bordeaux, France",
            "Mobile developer shipping native and cross-platform applications.",
        ),
        candidate(
            "6",
            "Alexandre Petit",
            15,
            &["Angular", "RxJS", "NgRx", "TypeScript"],
            "4 years",
            "Marseille, France",
            "Angular specialist with a taste for reactive architectures.",
        ),
        candidate(
            "7",
            "Camille Rousseau",
            33,
            &["Go", "Rust", "Distributed Systems", "Blockchain"],
            "5 years",
            "Lille, France",
            "Systems engineer fluent in low-level languages and emerging tech.",
        ),
        candidate(
            "8",
            "Hugo Blanc",
            47,
            &["PHP", "Laravel", "MySQL", "Redis"],
            "4 years",
            "Strasbourg, France",
            "Full-stack web developer across classic and modern stacks.",
        ),
    ]
}

/// Mock job offers used for job seekers when no ranked pool is available
pub fn builtin_jobs() -> Vec<JobOffer> {
    vec![
        job(
            "1",
            "Full-Stack Developer React/Node.js",
            "TechCorp",
            "Paris, France",
            &["React", "Node.js", "TypeScript", "MongoDB"],
            "Join a fast-moving team building modern web applications.",
            "50k-70k€",
            "🏢",
        ),
        job(
            "2",
            "Backend Engineer Python",
            "DataFlow",
            "Lyon, France",
            &["Python", "Django", "PostgreSQL", "Docker"],
            "Build robust, scalable APIs.",
            "45k-65k€",
            "💼",
        ),
        job(
            "3",
            "Frontend Developer Vue.js",
            "WebStudio",
            "Toulouse, France",
            &["Vue.js", "Nuxt.js", "GraphQL", "AWS"],
            "Craft great user experiences with current frontend technology.",
            "48k-68k€",
            "🎨",
        ),
        job(
            "4",
            "Java Spring Boot Architect",
            "Enterprise Solutions",
            "Nantes, France",
            &["Java", "Spring Boot", "Kubernetes", "Microservices"],
            "Design and implement large-scale microservice architectures.",
            "60k-80k€",
            "🏛️",
        ),
        job(
            "5",
            "Mobile Developer React Native",
            "AppMakers",
            "Bordeaux, France",
            &["React Native", "Firebase", "CI/CD", "TypeScript"],
            "Ship cross-platform mobile apps used by millions.",
            "50k-70k€",
            "📱",
        ),
        job(
            "6",
            "Senior Angular Developer",
            "Frontend Pro",
            "Marseille, France",
            &["Angular", "RxJS", "NgRx", "TypeScript"],
            "Work with expert developers on enterprise applications.",
            "55k-75k€",
            "⚡",
        ),
        job(
            "7",
            "Go/Rust Engineer",
            "Blockchain Labs",
            "Lille, France",
            &["Go", "Rust", "Distributed Systems", "Blockchain"],
            "Work on blockchain projects with cutting-edge technology.",
            "65k-85k€",
            "⛓️",
        ),
        job(
            "8",
            "PHP Laravel Developer",
            "WebDev Agency",
            "Strasbourg, France",
            &["PHP", "Laravel", "MySQL", "Redis"],
            "Build reliable web solutions for a wide range of clients.",
            "42k-60k€",
            "🌐",
        ),
    ]
}

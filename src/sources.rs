//! The university's searchable sources and static pages.
//!
//! Collection names, document ids, and field names are a schema contract
//! with the website's CMS. Order matters: it is the tie-break order of the
//! merged results.

use anyhow::Result;

use campus_search_core::models::{ResultKind, StaticPage};
use campus_search_core::source::{FieldPath, SearchField, SearchSource, SourceShape};

use crate::config::Config;
use crate::sqlite_store::SqliteStore;

/// Immutable source table and static page list, built once at startup.
#[derive(Debug, Clone)]
pub struct Registry {
    pub sources: Vec<SearchSource>,
    pub pages: Vec<StaticPage>,
}

impl Registry {
    pub fn new(sources: Vec<SearchSource>, pages: Vec<StaticPage>) -> Self {
        Self { sources, pages }
    }

    pub fn university() -> Self {
        Self::new(university_sources(), static_pages())
    }
}

pub fn university_sources() -> Vec<SearchSource> {
    vec![
        SearchSource {
            kind: ResultKind::Program,
            collection: "programs",
            shape: SourceShape::MultiDocument,
            fields: vec![
                SearchField::title("title"),
                SearchField::title("shortName"),
                SearchField::text("description"),
                SearchField::text("department"),
                SearchField::text("highlights"),
                SearchField::nested("details", "duration"),
            ],
            title_field: FieldPath::Key("title"),
            description_field: FieldPath::Key("description"),
            id_field: FieldPath::Key("slug"),
            path_prefix: "/programs/",
            icon: "graduation-cap",
        },
        SearchSource {
            kind: ResultKind::News,
            collection: "news",
            shape: SourceShape::MultiDocument,
            fields: vec![
                SearchField::title("title"),
                SearchField::text("excerpt"),
                SearchField::text("content"),
                SearchField::text("category"),
            ],
            title_field: FieldPath::Key("title"),
            description_field: FieldPath::Key("excerpt"),
            id_field: FieldPath::Key("slug"),
            path_prefix: "/news/",
            icon: "newspaper",
        },
        SearchSource {
            kind: ResultKind::Faculty,
            collection: "faculty",
            shape: SourceShape::MultiDocument,
            fields: vec![
                SearchField::title("name"),
                SearchField::text("designation"),
                SearchField::text("department"),
                SearchField::text("researchInterests"),
            ],
            title_field: FieldPath::Key("name"),
            description_field: FieldPath::Key("designation"),
            id_field: FieldPath::Key("_id"),
            path_prefix: "/faculty/",
            icon: "user",
        },
        SearchSource {
            kind: ResultKind::Notice,
            collection: "notices",
            shape: SourceShape::MultiDocument,
            fields: vec![
                SearchField::title("title"),
                SearchField::text("description"),
                SearchField::text("category"),
            ],
            title_field: FieldPath::Key("title"),
            description_field: FieldPath::Key("description"),
            id_field: FieldPath::Key("_id"),
            path_prefix: "/notices/",
            icon: "bell",
        },
        SearchSource {
            kind: ResultKind::Faq,
            collection: "admissions",
            shape: SourceShape::SingleDocument {
                doc_id: "admissions-page",
                array_field: "faqs",
            },
            fields: vec![SearchField::title("question"), SearchField::text("answer")],
            title_field: FieldPath::Key("question"),
            description_field: FieldPath::Key("answer"),
            id_field: FieldPath::Key("id"),
            path_prefix: "/admissions#faq-",
            icon: "help-circle",
        },
        SearchSource {
            kind: ResultKind::Activity,
            collection: "studentLife",
            shape: SourceShape::SingleDocument {
                doc_id: "student-life",
                array_field: "activities",
            },
            fields: vec![
                SearchField::title("title"),
                SearchField::text("description"),
                SearchField::text("category"),
            ],
            title_field: FieldPath::Key("title"),
            description_field: FieldPath::Key("description"),
            id_field: FieldPath::Key("id"),
            path_prefix: "/student-life#",
            icon: "users",
        },
        SearchSource {
            kind: ResultKind::Career,
            collection: "careers",
            shape: SourceShape::SingleDocument {
                doc_id: "career-page",
                array_field: "opportunities",
            },
            fields: vec![
                SearchField::title("title"),
                SearchField::text("department"),
                SearchField::text("description"),
                SearchField::text("requirements"),
            ],
            title_field: FieldPath::Key("title"),
            description_field: FieldPath::Key("description"),
            id_field: FieldPath::Key("id"),
            path_prefix: "/careers#",
            icon: "briefcase",
        },
    ]
}

const PAGE_ICON: &str = "file-text";

pub fn static_pages() -> Vec<StaticPage> {
    let page = |title, description, path| StaticPage {
        title,
        description,
        path,
        icon: PAGE_ICON,
    };
    vec![
        page("Home", "Welcome to the university", "/"),
        page(
            "About Us",
            "History, mission, vision and leadership of the university",
            "/about",
        ),
        page(
            "Admissions",
            "Admission requirements, deadlines, tuition fees and how to apply",
            "/admissions",
        ),
        page(
            "Academic Programs",
            "Undergraduate and graduate programs offered by our departments",
            "/programs",
        ),
        page(
            "Faculty Directory",
            "Professors, lecturers and researchers across all departments",
            "/faculty",
        ),
        page(
            "Alumni",
            "Alumni network, success stories and reunions",
            "/alumni",
        ),
        page(
            "Notices",
            "Official announcements, exam schedules and circulars",
            "/notices",
        ),
        page(
            "News & Events",
            "Latest news, events and campus stories",
            "/news",
        ),
        page(
            "Student Life",
            "Clubs, societies, sports and campus activities",
            "/student-life",
        ),
        page(
            "Careers",
            "Job openings and career opportunities at the university",
            "/careers",
        ),
        page(
            "Contact",
            "Campus address, phone numbers and office hours",
            "/contact",
        ),
    ]
}

/// Print every registered source with its document count.
pub async fn list_sources(config: &Config) -> Result<()> {
    let registry = Registry::university();
    let store = SqliteStore::open(config).await?;

    println!(
        "{:<10} {:<14} {:<36} {:<20} DOCS",
        "TYPE", "COLLECTION", "SHAPE", "PATH"
    );
    for source in &registry.sources {
        let count = store.count(source.collection).await?;
        println!(
            "{:<10} {:<14} {:<36} {:<20} {}",
            source.kind,
            source.collection,
            source.shape_label(),
            source.path_prefix,
            count
        );
    }
    println!("{:<10} {:<14} {:<36} {:<20} {}", "page", "-", "static", "-", registry.pages.len());

    store.close().await;
    Ok(())
}

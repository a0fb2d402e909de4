pub mod article;
pub mod content;
pub mod error;
pub mod extract;
pub mod groups;
pub mod node;
pub mod paragraph;
pub mod parse;
pub mod reconcile;
pub mod sanitize;
pub mod scoring;
pub mod title;
pub mod walker;

pub use article::{Article, Section};
pub use content::{ExtractedContent, ImageRef, OutputFormat, SectionSummary};
pub use error::{Result, SectioError};
pub use extract::{DEFAULT_RECOVER_TAGS, ExtractConfig, ExtractConfigBuilder, extract, extract_html, extract_tree};
pub use groups::{ElementGroup, group_children, sort_groups};
pub use node::{HtmlNode, TreeNode};
pub use paragraph::{DEFAULT_PARAGRAPH_TAGS, Paragraph, build_paragraphs, normalize_text};
pub use parse::Document;
pub use reconcile::reconcile;
pub use sanitize::{DEFAULT_EXCLUDED_TAGS, sanitize};
pub use scoring::{rank_sections, select_main_section};
pub use title::{DEFAULT_TITLE_SEPARATORS, extract_title, find_title, truncate_title};
pub use walker::{ElementRecord, ROOT_PARENT_ID, walk};

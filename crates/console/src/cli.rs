use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use folio_core::resume::ResumeKind;
use folio_core::types::DbId;

/// Command-line admin for the portfolio CMS.
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(about = "Browse and edit portfolio content on the CMS", long_about = None)]
#[command(version)]
pub struct Cli {
    /// CMS base URL (overrides FOLIO_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Print records as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in as the site admin and store the token
    Login {
        #[arg(long, env = "FOLIO_ADMIN_USERNAME")]
        username: String,
        #[arg(long, env = "FOLIO_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored admin token
    Logout,
    /// Show whether an admin token is stored
    Status,
    /// Admin overview: content counts and site stats
    Overview,
    /// Public site statistics
    Stats,
    /// Blog posts
    Blogs {
        #[command(subcommand)]
        action: BlogAction,
    },
    /// Portfolio projects
    Projects {
        #[command(subcommand)]
        action: ProjectAction,
    },
    /// Service offerings
    Services {
        #[command(subcommand)]
        action: ServiceAction,
    },
    /// Tool directory
    Tools {
        #[command(subcommand)]
        action: ToolAction,
    },
    /// Send a message through the contact form
    Contact(ContactArgs),
    /// Resume downloads
    Resume {
        #[command(subcommand)]
        action: ResumeAction,
    },
}

// ---------------------------------------------------------------------------
// Content
// ---------------------------------------------------------------------------

#[derive(Subcommand, Debug)]
pub enum BlogAction {
    /// List posts (published only, unless --all)
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        featured: bool,
        /// Include drafts (admin)
        #[arg(long)]
        all: bool,
    },
    /// Show one post
    Show {
        slug: String,
        /// Read through the admin endpoint so drafts are visible
        #[arg(long)]
        preview: bool,
    },
    /// Like a post
    Like { slug: String },
    /// Create a post
    New {
        #[command(flatten)]
        fields: BlogFields,
        #[command(flatten)]
        images: ImageArgs,
        #[command(flatten)]
        save: SaveArgs,
    },
    /// Edit a post by slug
    Edit {
        slug: String,
        #[command(flatten)]
        fields: BlogFields,
        #[command(flatten)]
        images: ImageArgs,
        #[command(flatten)]
        save: SaveArgs,
    },
    /// Delete a post by id
    Delete { id: DbId },
}

#[derive(Args, Debug, Default)]
pub struct BlogFields {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub excerpt: Option<String>,
    /// File holding the HTML body
    #[arg(long)]
    pub content_file: Option<PathBuf>,
    #[arg(long)]
    pub author: Option<String>,
    /// Reading time in minutes
    #[arg(long)]
    pub read_time: Option<i32>,
    #[arg(long)]
    pub meta_title: Option<String>,
    #[arg(long)]
    pub meta_description: Option<String>,
    #[arg(long)]
    pub meta_keywords: Option<String>,
    #[arg(long)]
    pub featured: Option<bool>,
    #[arg(long)]
    pub category_id: Option<DbId>,
    /// Tag id (repeatable)
    #[arg(long = "tag")]
    pub tag_ids: Vec<DbId>,
}

#[derive(Subcommand, Debug)]
pub enum ProjectAction {
    List {
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        featured: bool,
        /// Include unpublished projects (admin)
        #[arg(long)]
        all: bool,
    },
    Show { slug: String },
    New {
        #[command(flatten)]
        fields: ProjectFields,
        #[command(flatten)]
        images: ImageArgs,
        #[command(flatten)]
        save: SaveArgs,
    },
    Edit {
        slug: String,
        #[command(flatten)]
        fields: ProjectFields,
        #[command(flatten)]
        images: ImageArgs,
        #[command(flatten)]
        save: SaveArgs,
    },
    Delete { id: DbId },
}

#[derive(Args, Debug, Default)]
pub struct ProjectFields {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// File holding the HTML long description
    #[arg(long)]
    pub long_description_file: Option<PathBuf>,
    #[arg(long)]
    pub demo_url: Option<String>,
    #[arg(long)]
    pub github_url: Option<String>,
    #[arg(long)]
    pub live_url: Option<String>,
    #[arg(long)]
    pub demo_video_url: Option<String>,
    #[arg(long)]
    pub client: Option<String>,
    #[arg(long)]
    pub duration: Option<String>,
    #[arg(long)]
    pub team_size: Option<i32>,
    #[arg(long)]
    pub status: Option<String>,
    /// Add a tech stack entry (repeatable)
    #[arg(long = "tech")]
    pub add_tech: Vec<String>,
    /// Remove a tech stack entry (repeatable)
    #[arg(long)]
    pub remove_tech: Vec<String>,
    /// Add a gallery image URL (repeatable)
    #[arg(long = "gallery")]
    pub add_gallery: Vec<String>,
    #[arg(long)]
    pub remove_gallery: Vec<String>,
    #[arg(long)]
    pub featured: Option<bool>,
    #[arg(long)]
    pub category_id: Option<DbId>,
    #[arg(long = "tag")]
    pub tag_ids: Vec<DbId>,
}

#[derive(Subcommand, Debug)]
pub enum ServiceAction {
    List {
        #[arg(long)]
        featured: bool,
        /// Include inactive services (admin)
        #[arg(long)]
        all: bool,
    },
    Show { slug: String },
    New {
        #[command(flatten)]
        fields: ServiceFields,
        #[command(flatten)]
        images: ImageArgs,
        #[command(flatten)]
        save: SaveArgs,
    },
    Edit {
        slug: String,
        #[command(flatten)]
        fields: ServiceFields,
        #[command(flatten)]
        images: ImageArgs,
        #[command(flatten)]
        save: SaveArgs,
    },
    Delete { id: DbId },
}

#[derive(Args, Debug, Default)]
pub struct ServiceFields {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub long_description_file: Option<PathBuf>,
    #[arg(long)]
    pub price: Option<f64>,
    #[arg(long)]
    pub price_range: Option<String>,
    #[arg(long)]
    pub currency: Option<String>,
    #[arg(long)]
    pub pricing_model: Option<String>,
    #[arg(long)]
    pub duration: Option<String>,
    /// Add a feature (repeatable)
    #[arg(long = "feature")]
    pub add_feature: Vec<String>,
    #[arg(long)]
    pub remove_feature: Vec<String>,
    /// Add a deliverable (repeatable)
    #[arg(long = "deliverable")]
    pub add_deliverable: Vec<String>,
    #[arg(long)]
    pub remove_deliverable: Vec<String>,
    #[arg(long)]
    pub active: Option<bool>,
    #[arg(long)]
    pub featured: Option<bool>,
    #[arg(long)]
    pub order: Option<i32>,
}

/// Image files to upload with the save.
#[derive(Args, Debug, Default)]
pub struct ImageArgs {
    /// Featured image file
    #[arg(long)]
    pub featured_image: Option<PathBuf>,
    /// Thumbnail (blogs, projects) or icon (services) image file
    #[arg(long = "thumbnail", visible_alias = "icon")]
    pub secondary_image: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub struct SaveArgs {
    /// Publish (or activate) on save
    #[arg(long)]
    pub publish: bool,
    /// Save for preview instead of confirming
    #[arg(long, conflicts_with = "publish")]
    pub preview: bool,
    /// Where to write an HTML preview document
    #[arg(long)]
    pub preview_out: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Site
// ---------------------------------------------------------------------------

#[derive(Subcommand, Debug)]
pub enum ToolAction {
    List {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        featured: bool,
    },
    Show { slug: String },
    /// Record a click and print the tool's link
    Click { slug: String },
}

#[derive(Args, Debug)]
pub struct ContactArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub message: String,
    #[arg(long)]
    pub company: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub service: Option<String>,
    #[arg(long)]
    pub project_type: Option<String>,
    #[arg(long)]
    pub budget: Option<String>,
    #[arg(long)]
    pub timeline: Option<String>,
    #[arg(long)]
    pub priority: Option<String>,
    #[arg(long)]
    pub technical_requirements: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ResumeAction {
    /// List the available variants
    List,
    /// Print a download link (onepage, full, technical)
    Link { kind: ResumeKind },
    /// Download a variant
    Download {
        kind: ResumeKind,
        /// Output path (defaults to the variant's file name)
        #[arg(long, short)]
        out: Option<PathBuf>,
    },
}

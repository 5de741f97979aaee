//! Plain-text rendering of CMS records.

use std::fmt::Write;

use serde::Serialize;

use folio_client::admin::OverviewSummary;
use folio_core::models::{Blog, Project, Service, Stats, Tool};
use folio_core::resume::ResumeKind;

/// Pretty JSON for `--json`.
pub fn json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn status_tag(live: bool, live_label: &'static str, off_label: &'static str) -> &'static str {
    if live {
        live_label
    } else {
        off_label
    }
}

pub fn blog_line(blog: &Blog) -> String {
    format!(
        "#{:<4} {:<10} {}  ({}, {} views, {} likes) /{}",
        blog.id,
        status_tag(blog.published, "published", "draft"),
        blog.title,
        blog.display_date().format("%Y-%m-%d"),
        blog.views,
        blog.likes,
        blog.slug
    )
}

pub fn blog_detail(blog: &Blog) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", blog.title);
    let _ = writeln!(
        out,
        "by {} on {}{}",
        if blog.author.is_empty() { "Admin" } else { &blog.author },
        blog.display_date().format("%B %-d, %Y"),
        blog.read_time
            .map(|minutes| format!(" · {minutes} min read"))
            .unwrap_or_default()
    );
    if !blog.excerpt.is_empty() {
        let _ = writeln!(out, "\n{}", blog.excerpt);
    }
    let _ = writeln!(out, "\n{}", blog.content);
    let _ = write!(out, "\n{} views · {} likes", blog.views, blog.likes);
    out
}

pub fn project_line(project: &Project) -> String {
    format!(
        "#{:<4} {:<11} {}  [{}] /{}",
        project.id,
        status_tag(project.published, "published", "unpublished"),
        project.title,
        project.status,
        project.slug
    )
}

pub fn project_detail(project: &Project) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}  [{}]", project.title, project.status);
    let _ = writeln!(out, "{}", project.description);
    if let Ok(stack) = project.tech_stack_list() {
        if !stack.is_empty() {
            let _ = writeln!(out, "Stack: {}", stack.join(", "));
        }
    }
    for (label, url) in [
        ("Live", &project.live_url),
        ("Demo", &project.demo_url),
        ("Source", &project.github_url),
    ] {
        if let Some(url) = url.as_deref().filter(|u| !u.is_empty()) {
            let _ = writeln!(out, "{label}: {url}");
        }
    }
    if let Some(long) = project.long_description.as_deref() {
        let _ = writeln!(out, "\n{long}");
    }
    out.trim_end().to_string()
}

pub fn service_line(service: &Service) -> String {
    format!(
        "#{:<4} {:<8} {}  {} /{}",
        service.id,
        status_tag(service.active, "active", "inactive"),
        service.title,
        service.price_label().unwrap_or_else(|| "price on request".to_string()),
        service.slug
    )
}

pub fn service_detail(service: &Service) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", service.title);
    let _ = writeln!(out, "{}", service.description);
    if let Some(price) = service.price_label() {
        let _ = writeln!(out, "Price: {price}");
    }
    if let Some(duration) = service.duration.as_deref() {
        let _ = writeln!(out, "Duration: {duration}");
    }
    for (label, items) in [
        ("Features", service.feature_list()),
        ("Deliverables", service.deliverable_list()),
    ] {
        if let Ok(items) = items {
            if !items.is_empty() {
                let _ = writeln!(out, "{label}:");
                for item in items {
                    let _ = writeln!(out, "  - {item}");
                }
            }
        }
    }
    if let Some(long) = service.long_description.as_deref() {
        let _ = writeln!(out, "\n{long}");
    }
    out.trim_end().to_string()
}

pub fn tool_line(tool: &Tool) -> String {
    format!(
        "{:<24} {:<14} {} clicks  {}",
        tool.name,
        tool.category.as_deref().unwrap_or("-"),
        tool.clicks,
        tool.primary_link().unwrap_or("")
    )
    .trim_end()
    .to_string()
}

pub fn tool_detail(tool: &Tool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", tool.name);
    let _ = writeln!(out, "{}", tool.description);
    if let Some(link) = tool.primary_link() {
        let _ = writeln!(out, "Link: {link}");
    }
    if let Ok(features) = tool.feature_list() {
        for feature in features {
            let _ = writeln!(out, "  - {feature}");
        }
    }
    let _ = write!(out, "{} views · {} clicks", tool.views, tool.clicks);
    out
}

pub fn stats(stats: &Stats) -> String {
    format!(
        "Blogs: {}  Projects: {}  Services: {}  Tools: {}\nViews: {} total ({} blog, {} project)",
        stats.blogs,
        stats.projects,
        stats.services,
        stats.tools,
        stats.total_views,
        stats.blog_views,
        stats.project_views
    )
}

pub fn overview(summary: &OverviewSummary) -> String {
    format!(
        "Blogs: {} ({} published)\nProjects: {} ({} published)\nServices: {} ({} active)",
        summary.blogs,
        summary.published_blogs,
        summary.projects,
        summary.published_projects,
        summary.services,
        summary.active_services
    )
}

pub fn resume_line(kind: ResumeKind) -> String {
    format!(
        "{:<10} {:<18} {}",
        kind.slug(),
        kind.display_name(),
        kind.description()
    )
}

//! Public site commands: stats, tools, contact form and resume downloads.

use std::sync::Arc;

use anyhow::{bail, Context as _};

use folio_client::contact::{ContactForm, SubmitStatus};
use folio_client::pages::Engagement;
use folio_client::query::ToolQuery;
use folio_client::resource;
use folio_client::resume::ResumeLinks;
use folio_core::contact::ContactMessage;
use folio_core::resume::ResumeKind;

use super::Context;
use crate::cli::{ContactArgs, ResumeAction, ToolAction};
use crate::render;

pub(super) async fn stats(ctx: &Context) -> anyhow::Result<()> {
    let state = resource::stats(Arc::clone(&ctx.api)).set_key(()).await;
    if let Some(error) = state.error {
        bail!(error.message);
    }
    let stats = state.data.context("No stats returned")?;
    ctx.emit(&stats, render::stats)
}

pub(super) async fn tools(ctx: &Context, action: ToolAction) -> anyhow::Result<()> {
    match action {
        ToolAction::List { category, featured } => {
            let query = ToolQuery {
                category,
                featured: featured.then_some(true),
                ..Default::default()
            };
            let state = resource::tools(Arc::clone(&ctx.api)).set_key(query).await;
            if let Some(error) = state.error {
                bail!(error.message);
            }
            ctx.emit_list(&state.data.unwrap_or_default(), render::tool_line)
        }
        ToolAction::Show { slug } => {
            let tool = ctx.api.tool(&slug).await?;
            ctx.emit(&tool, render::tool_detail)
        }
        ToolAction::Click { slug } => {
            let tool = ctx.api.tool(&slug).await?;
            let clicks = Engagement::clicks(&tool);
            if let Some(count) = clicks.trigger(&ctx.api).await? {
                println!("{} ({count} clicks)", tool.name);
            }
            match tool.primary_link() {
                Some(link) => println!("{link}"),
                None => println!("{} has no link", tool.name),
            }
            Ok(())
        }
    }
}

pub(super) async fn contact(ctx: &Context, args: ContactArgs) -> anyhow::Result<()> {
    let mut form = ContactForm::new();
    if let Some(service) = &args.service {
        form.load_service_options(&ctx.api).await;
        if !form.service_options.is_empty() && !form.service_options.contains(service) {
            tracing::warn!(service = %service, "Service is not one of the active offerings");
        }
    }
    form.message = message_from(args);

    let status = form.submit(&ctx.api).await.clone();
    if let Some(email_error) = form.email_error {
        bail!(email_error);
    }
    match status {
        SubmitStatus::Success(message) => {
            println!("{message}");
            Ok(())
        }
        SubmitStatus::Error(message) => bail!(message),
        SubmitStatus::Idle => Ok(()),
    }
}

fn message_from(args: ContactArgs) -> ContactMessage {
    ContactMessage {
        name: args.name,
        email: args.email,
        company: args.company,
        phone: args.phone,
        service: args.service,
        project_type: args.project_type,
        budget: args.budget,
        timeline: args.timeline,
        priority: args.priority,
        technical_requirements: args.technical_requirements,
        message: args.message,
    }
}

pub(super) async fn resume(ctx: &Context, action: ResumeAction) -> anyhow::Result<()> {
    let links = ResumeLinks::new(&ctx.api, ctx.config.resume_mode);
    match action {
        ResumeAction::List => {
            for kind in ResumeKind::ALL {
                println!("{}", render::resume_line(kind));
            }
            Ok(())
        }
        ResumeAction::Link { kind } => {
            println!("{}", links.link(kind).await?);
            Ok(())
        }
        ResumeAction::Download { kind, out } => {
            let bytes = links.download(kind).await?;
            let path = out.unwrap_or_else(|| kind.filename().into());
            tokio::fs::write(&path, &bytes)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Saved {} ({} bytes) to {}", kind.display_name(), bytes.len(), path.display());
            Ok(())
        }
    }
}

use folio_client::admin::Dashboard;

use super::Context;
use crate::render;

pub(super) async fn login(ctx: &Context, username: &str, password: &str) -> anyhow::Result<()> {
    ctx.session.login(username, password).await?;
    println!("Logged in as {username}.");
    Ok(())
}

pub(super) fn logout(ctx: &Context) -> anyhow::Result<()> {
    ctx.session.logout()?;
    println!("Logged out.");
    Ok(())
}

pub(super) fn status(ctx: &Context) -> anyhow::Result<()> {
    if ctx.session.is_authenticated() {
        println!("Logged in ({})", ctx.config.api_url);
    } else {
        println!("Not logged in ({})", ctx.config.api_url);
    }
    Ok(())
}

pub(super) async fn overview(ctx: &Context) -> anyhow::Result<()> {
    let mut dashboard = Dashboard::new(ctx.session.clone());
    if let Err(err) = dashboard.refresh().await {
        return match dashboard.error() {
            Some(banner) => Err(anyhow::anyhow!("{banner}")),
            None => Err(err.into()),
        };
    }

    let summary = dashboard.overview().summary();
    if ctx.json {
        let value = serde_json::json!({
            "blogs": summary.blogs,
            "published_blogs": summary.published_blogs,
            "projects": summary.projects,
            "published_projects": summary.published_projects,
            "services": summary.services,
            "active_services": summary.active_services,
            "stats": dashboard.stats(),
        });
        println!("{}", render::json(&value)?);
        return Ok(());
    }

    println!("{}", render::overview(&summary));
    if let Some(stats) = dashboard.stats() {
        println!("\n{}", render::stats(stats));
    }
    Ok(())
}

use anyhow::Result;
use tokenswap_application::BrowserRenderer;
use tokenswap_core::OpaqueReference;

use super::context::AppContext;

pub enum OutputFormat {
    Table,
    Json,
    Html,
}

pub async fn browse(
    ctx: &AppContext,
    query: Option<String>,
    select: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let service = ctx.catalog_service();
    let mut browser = service.open_browser(&ctx.auth_key().await?).await?;

    if let Some(query) = query {
        browser.set_query(query);
    }
    if let Some(id) = select.as_deref() {
        browser.select(id)?;
    }

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&browser.visible())?);
        }
        OutputFormat::Html => {
            println!("{}", BrowserRenderer::new()?.render(&browser)?);
        }
        OutputFormat::Table => {
            println!("{}", browser.title());
            for item in browser.visible() {
                let origin = match (&item.pack, item.is_user) {
                    (Some(pack), _) => format!("pack: {pack}"),
                    (None, true) => "user".to_string(),
                    (None, false) => String::new(),
                };
                println!("  {:<14} {:<36} {}", item.id, item.name, origin);
            }
        }
    }

    if select.is_some() {
        let reference = service.confirm_selection(browser)?;
        eprintln!("Selected: {reference}");
    }

    Ok(())
}

/// Resolves each reference in order. The catalog is fetched once and reused
/// while the cache stays fresh.
pub async fn resolve(ctx: &AppContext, references: &[String]) -> Result<()> {
    let service = ctx.catalog_service();
    let auth_key = if references.iter().any(|r| OpaqueReference::is_reference(r)) {
        ctx.auth_key().await?
    } else {
        String::new()
    };

    for reference in references {
        if OpaqueReference::is_reference(reference) {
            if let Err(err) = service.ensure_fresh(&auth_key).await {
                tracing::warn!(error = %err, "Resolving without a catalog");
            }
        }
        println!("{}", service.resolve(reference));
    }
    Ok(())
}

pub async fn hero_list(ctx: &AppContext) -> Result<()> {
    let service = ctx.catalog_service();
    service.ensure_fresh(&ctx.auth_key().await?).await?;

    for entry in service.hero_list() {
        println!("{}\t{}\t{}", entry.slug, entry.display_name, entry.output);
    }
    Ok(())
}

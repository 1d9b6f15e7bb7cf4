use anyhow::Result;
use tokenswap_core::catalog::parse_auth_keys;
use tokenswap_core::config_form::field_name;
use tokenswap_core::swap::SwapMode;

use super::context::AppContext;
use super::utils::parse_field;

pub async fn show(ctx: &AppContext) -> Result<()> {
    let accounts = parse_auth_keys(&ctx.auth_key().await?).map_or(0, |keys| keys.len());
    println!("Auth key: {accounts} account(s) configured");

    let rows = ctx.config_service().rows().await?;
    if rows.is_empty() {
        println!("No characters found.");
    }
    for row in rows {
        println!("{} ({})", row.name, row.id);
        for mode in [SwapMode::Normal, SwapMode::Battle] {
            println!(
                "  {:<20} {}",
                field_name(&row.id, mode),
                row.settings.path(mode).unwrap_or("-")
            );
        }
    }
    Ok(())
}

pub async fn set_auth_key(ctx: &AppContext, key: &str) -> Result<()> {
    ctx.config_service().set_auth_key(key).await?;
    println!("Auth key saved.");
    Ok(())
}

pub async fn assign(ctx: &AppContext, actor_id: &str, mode: SwapMode, path: &str) -> Result<()> {
    ctx.config_service().assign(actor_id, mode, path).await?;
    println!("{} = {}", field_name(actor_id, mode), path.trim());
    Ok(())
}

pub async fn pick(ctx: &AppContext, actor_id: &str, mode: SwapMode, good_id: &str) -> Result<()> {
    let catalog = ctx.catalog_service();
    let mut browser = catalog.open_browser(&ctx.auth_key().await?).await?;
    browser.select(good_id)?;

    let reference = ctx
        .config_service()
        .pick_from_browser(actor_id, mode, browser)
        .await?;
    println!("{} = {}", field_name(actor_id, mode), reference);
    Ok(())
}

pub async fn form(ctx: &AppContext, fields: &[String]) -> Result<()> {
    let fields = fields
        .iter()
        .map(|field| parse_field(field))
        .collect::<Result<Vec<_>>>()?;

    let models = ctx.config_service().submit(fields).await?;
    println!("Saved model paths for {} actor(s).", models.len());
    Ok(())
}

pub async fn tokens(ctx: &AppContext) -> Result<()> {
    for choice in ctx.config_service().token_model_choices().await? {
        let model = if choice.model.is_empty() { "-" } else { choice.model.as_str() };
        println!("{:<24} {}", choice.token_name, model);
    }
    Ok(())
}

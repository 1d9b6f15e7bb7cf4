//! Browser View
//!
//! Renders a [`BrowserState`] to the HTML fragment shown in the catalog
//! browser dialog.

use minijinja::{Environment, context};
use tokenswap_core::SwapError;
use tokenswap_core::browser::BrowserState;
use tokenswap_core::error::Result;

const BROWSER_TEMPLATE_NAME: &str = "browser.html";

const BROWSER_TEMPLATE: &str = r#"<section class="hf-browser">
  <h1>{{ title }}</h1>
  <input type="text" class="hf-search" name="search" placeholder="Search" value="{{ query }}">
  <input type="text" class="hf-selected" name="file" readonly value="{{ selected }}">
  <ul class="hf-miniatures">
  {%- for mini in miniatures %}
    <li class="hf-mini{% if mini.is_user %} hf-user{% endif %}{% if selected_id == mini.id %} selected{% endif %}"
        data-goodid="{{ mini.id }}" data-name="{{ mini.name }}"
        {%- if mini.pack_colors %} style="background: {{ mini.pack_colors.background }}; border-color: {{ mini.pack_colors.border }};"{% endif %}>
      {%- if mini.thumb %}
      <img src="{{ mini.thumb }}" alt="{{ mini.name }}">
      {%- endif %}
      <span class="hf-name">{{ mini.name }}</span>
      {%- if mini.pack %}
      <span class="hf-pack">{{ mini.pack }}</span>
      {%- endif %}
    </li>
  {%- endfor %}
  </ul>
</section>
"#;

/// HTML renderer for the catalog browser.
pub struct BrowserRenderer {
    env: Environment<'static>,
}

impl BrowserRenderer {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.add_template(BROWSER_TEMPLATE_NAME, BROWSER_TEMPLATE)
            .map_err(|e| SwapError::internal(format!("Invalid browser template: {e}")))?;
        Ok(Self { env })
    }

    /// Renders the visible goods of `state`.
    pub fn render(&self, state: &BrowserState) -> Result<String> {
        let template = self
            .env
            .get_template(BROWSER_TEMPLATE_NAME)
            .map_err(|e| SwapError::internal(format!("Browser template missing: {e}")))?;

        let selected = state.selected();
        template
            .render(context! {
                title => state.title(),
                query => state.query(),
                selected => selected.map(|r| r.to_string()).unwrap_or_default(),
                selected_id => selected.map(|r| r.id.clone()),
                miniatures => state.visible(),
            })
            .map_err(|e| SwapError::internal(format!("Failed to render browser: {e}")))
    }
}

//! HTML templates for the directory pages.
//!
//! Templates are compiled once into a [`minijinja::Environment`] at startup;
//! a syntax error there is fatal. Rendering only binds values, and every
//! interpolated value is HTML-escaped.

use chrono::{DateTime, Utc};
use minijinja::{Environment, context};
use thiserror::Error;

use crate::domain::{DetailPage, SummaryPage};

const STYLE_NAME: &str = "style.html";
const SUMMARY_NAME: &str = "summary.html";
const DETAIL_NAME: &str = "detail.html";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const STYLE_TEMPLATE: &str = r#"<style>
table {
    font-family: arial, sans-serif;
    border-collapse: collapse;
    width: 100%;
}

td, th {
    border: 1px solid #dddddd;
    text-align: left;
    padding: 8px;
}

tr:nth-child(even) {
    background-color: #dddddd;
}
</style>"#;

const SUMMARY_TEMPLATE: &str = r#"<html><head>{% include "style.html" %}</head>
<body>
{%- if use_emoji %}
	<h1>&#x1f607;&#x1f607;</h1>
{%- endif %}

	<table>
	<tr><th>Username</th></tr>
{%- for username in usernames %}
		<tr><td><font color="blue">{{ username }}</font></td></tr>
{%- else %}
		<tr><td><font color="red">None!</font></td></tr>
{%- endfor %}
	</table>
	{{ now }}
</body></html>"#;

const DETAIL_TEMPLATE: &str = r#"<html><head>{% include "style.html" %}</head>
<body>
{%- if use_emoji %}
	<h1>&#x1f608;&#x1f608;</h1>
{%- endif %}

	<table>
	<tr><th>Username</th><th>Name</th><th>Password</th></tr>
{%- for row in rows %}
		<tr><td>{{ row.username }}</td>
			<td><font color="blue">{{ row.name }}</font></td>
			<td><font color="red">{{ row.password }}</font></td>
		</tr>
{%- else %}
		<tr><td colspan="3"><font color="red">None!</font></td></tr>
{%- endfor %}
	</table>
	{{ now }}
</body></html>"#;

/// Template compilation failure at startup.
#[derive(Debug, Error)]
#[error("failed to compile html template: {0}")]
pub struct TemplateCompileError(#[from] minijinja::Error);

/// Template execution failure while serving a request.
#[derive(Debug, Error)]
#[error("failed to execute html template: {0}")]
pub struct RenderError(#[from] minijinja::Error);

/// Values shared by both pages besides the table contents.
#[derive(Debug, Clone, Copy)]
pub struct PageChrome {
    /// Show the decorative emoji heading.
    pub use_emoji: bool,
    /// Time printed under the table.
    pub now: DateTime<Utc>,
}

impl PageChrome {
    fn timestamp(&self) -> String {
        self.now.format(TIMESTAMP_FORMAT).to_string()
    }
}

/// Compiled page templates, shared read-only across workers.
pub struct PageTemplates {
    env: Environment<'static>,
}

impl PageTemplates {
    /// Compile the page templates.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateCompileError`] if any template fails to parse.
    pub fn compile() -> Result<Self, TemplateCompileError> {
        let mut env = Environment::new();
        env.add_template(STYLE_NAME, STYLE_TEMPLATE)?;
        env.add_template(SUMMARY_NAME, SUMMARY_TEMPLATE)?;
        env.add_template(DETAIL_NAME, DETAIL_TEMPLATE)?;
        Ok(Self { env })
    }

    /// Render the usernames-only page.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if template execution fails.
    pub fn render_summary(
        &self,
        page: &SummaryPage,
        chrome: PageChrome,
    ) -> Result<String, RenderError> {
        let template = self.env.get_template(SUMMARY_NAME)?;
        Ok(template.render(context! {
            use_emoji => chrome.use_emoji,
            usernames => page.usernames(),
            now => chrome.timestamp(),
        })?)
    }

    /// Render the full-record page.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if template execution fails.
    pub fn render_detail(
        &self,
        page: &DetailPage,
        chrome: PageChrome,
    ) -> Result<String, RenderError> {
        let template = self.env.get_template(DETAIL_NAME)?;
        Ok(template.render(context! {
            use_emoji => chrome.use_emoji,
            rows => page.rows(),
            now => chrome.timestamp(),
        })?)
    }
}

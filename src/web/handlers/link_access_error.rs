use askama::Template;
use askama_web::WebTemplate;

/// Page shown when a short link cannot be followed.
#[derive(Template, WebTemplate)]
#[template(path = "link_access_error.html")]
pub struct LinkAccessErrorTemplate {
    pub message: String,
}

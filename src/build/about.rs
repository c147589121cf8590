use super::SiteContext;
use crate::config::AboutSection;
use crate::error::Result;

pub fn render(tera: &tera::Tera, site: &SiteContext, about: &AboutSection) -> Result<String> {
    let mut ctx = tera::Context::new();
    ctx.insert("site", site);
    ctx.insert("about", about);
    Ok(tera.render("about.html", &ctx)?)
}

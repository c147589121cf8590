use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::Result;

pub const DEFAULT_BASE: &str = r##"<!DOCTYPE html>
<html lang="{{ site.language | escape_xml }}">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>{% block title %}{{ site.title | escape }}{% endblock %}</title>
  <meta name="description" content="{% block description %}{{ site.description | escape }}{% endblock %}" />
{% block head %}{% endblock %}
  <link rel="stylesheet" href="{{ site.base_url | escape_xml }}/styles/main.css">
  <link rel="canonical" href="{% block canonical %}{{ site.base_url | escape_xml }}/{% endblock %}">
</head>
<body>
  <div class="main">
    <div class="site-header">
      <a href="{{ site.base_url | escape_xml }}/"><h1 class="site-title">{{ site.title | escape }}</h1></a>
      <p class="site-description">{{ site.tagline | escape }}</p>
      <div class="top-nav">
        <a href="{{ site.base_url | escape_xml }}/about.html">About</a>
        <a href="{{ site.base_url | escape_xml }}/tags.html">Tags</a>
        <a href="{{ site.base_url | escape_xml }}/archive.html">Archive</a>
      </div>
    </div>

    <div class="main-content">
{% block content %}{% endblock %}
    </div>

    <div class="site-footer">
      <p>{{ site.copyright | escape }}</p>
{% if site.footer_links %}      <p>{% for link in site.footer_links %}{% if not loop.first %} · {% endif %}<a href="{{ link.url | escape_xml }}" target="_blank" rel="noopener">{{ link.label | escape }}</a>{% endfor %}</p>
{% endif %}    </div>
  </div>
{% if site.analytics_id %}
  <script async src="https://www.googletagmanager.com/gtag/js?id={{ site.analytics_id | urlencode_strict }}"></script>
  <script>
    window.dataLayer = window.dataLayer || [];
    function gtag(){dataLayer.push(arguments);}
    gtag('js', new Date());
    gtag('config', {{ site.analytics_id | json_encode | replace(from="<", to="\u003c") }});
  </script>
{% endif %}</body>
</html>
"##;

pub const DEFAULT_HOME: &str = r##"{% extends "base.html" %}
{% block title %}{{ site.title | escape }} | {{ site.headline | escape }}{% endblock %}
{% block head %}  <meta name="keywords" content="{{ site.keywords | escape }}" />
{% if site.author %}  <meta name="author" content="{{ site.author | escape }}" />
{% endif %}  <meta property="og:site_name" content="{{ site.title | escape }}" />
  <meta property="og:title" content="{{ site.title | escape }} | {{ site.headline | escape }}" />
  <meta property="og:description" content="{{ site.description | escape }}" />
  <meta property="og:type" content="website" />
  <meta property="og:url" content="{{ site.base_url | escape_xml }}/" />
  <meta name="twitter:card" content="summary" />
  <script type="application/ld+json">
{{ website_jsonld }}
  </script>
{% endblock %}
{% block content %}
      <div class="hero">
        <h2 class="hero-title">{{ site.headline | escape }}</h2>
        <p class="hero-description">{{ site.description | escape }}</p>
      </div>
{% if featured %}
      <section class="featured">
        <h2 class="section-title">Featured</h2>
        <div class="post-list">
{% for post in featured %}
          <article class="post-item featured-item">
            <h2 class="post-title"><a href="{{ post.url | escape_xml }}">{{ post.title | escape }}</a></h2>
            <div class="post-meta">
              <span class="post-date">{{ post.date | escape }}</span>
              <span class="post-tags">{{ post.tag_line | escape }}</span>
            </div>
            <p class="post-excerpt">{{ post.excerpt | escape }}</p>
          </article>
{% endfor %}
        </div>
      </section>
{% endif %}
{% if topics %}
      <section class="topics">
        <h2 class="section-title">Topics</h2>
        <div class="tag-index">
{% for topic in topics %}
          <a class="tag-chip" href="{{ site.base_url | escape_xml }}/tags.html#{{ topic.anchor }}">{{ topic.label | escape }} <span class="tag-count">{{ topic.count }}</span></a>
{% endfor %}
        </div>
      </section>
{% endif %}
      <section class="latest">
        <h2 class="section-title">Latest</h2>
        <div class="post-list">
{% for post in latest %}
          <article class="post-item">
            <h2 class="post-title"><a href="{{ post.url | escape_xml }}">{{ post.title | escape }}</a></h2>
            <div class="post-meta">
              <span class="post-date">{{ post.date | escape }}</span>
              <span class="post-tags">{{ post.tag_line | escape }}</span>
            </div>
            <p class="post-excerpt">{{ post.excerpt | escape }}</p>
          </article>
{% endfor %}
{% if not latest and not featured %}
          <p class="empty">No posts yet.</p>
{% endif %}
        </div>
      </section>
{% endblock %}"##;

pub const DEFAULT_TAGS: &str = r##"{% extends "base.html" %}
{% block title %}Tags | {{ site.title | escape }}{% endblock %}
{% block description %}Browse by tags{% endblock %}
{% block canonical %}{{ site.base_url | escape_xml }}/tags.html{% endblock %}
{% block content %}
<div class="page">
  <div class="page-card">
    <h2>Tags</h2>
    <div class="tag-index">
{% for tag in tags %}
      <a class="tag-chip" href="#{{ tag.anchor }}">{{ tag.label | escape }} <span class="tag-count">{{ tag.count }}</span></a>
{% endfor %}
    </div>
{% for tag in tags %}
    <h3 id="{{ tag.anchor }}" class="tag-title">{{ tag.label | escape }} <span class="tag-count">{{ tag.count }}</span></h3>
    <ul class="tag-list">
{% for post in tag.posts %}
      <li><a href="{{ post.url | escape_xml }}">{{ post.title | escape }}</a> <span class="archive-date">{{ post.date | escape }}</span></li>
{% endfor %}
    </ul>
{% endfor %}
  </div>
</div>
{% endblock %}"##;

pub const DEFAULT_ARCHIVE: &str = r##"{% extends "base.html" %}
{% block title %}Archive | {{ site.title | escape }}{% endblock %}
{% block description %}Archive by time{% endblock %}
{% block canonical %}{{ site.base_url | escape_xml }}/archive.html{% endblock %}
{% block content %}
<div class="page">
  <div class="page-card">
    <h2>Archive</h2>
{% for month in months %}
    <h3 id="m-{{ month.key }}" class="archive-month">{{ month.key }}{% if month.label %} <span class="archive-month-label">{{ month.label }}</span>{% endif %}</h3>
    <ul class="archive-list">
{% for post in month.posts %}
      <li><a href="{{ post.url | escape_xml }}">{{ post.title | escape }}</a> <span class="archive-date">{{ post.date | escape }}</span></li>
{% endfor %}
    </ul>
{% endfor %}
  </div>
</div>
{% endblock %}"##;

pub const DEFAULT_ABOUT: &str = r##"{% extends "base.html" %}
{% block title %}{{ about.heading | escape }} | {{ site.title | escape }}{% endblock %}
{% block description %}{{ about.heading | escape }} {{ site.title | escape }}{% endblock %}
{% block canonical %}{{ site.base_url | escape_xml }}/about.html{% endblock %}
{% block content %}
<div class="page">
  <div class="page-card">
    <h2>{{ about.heading | escape }}</h2>
{% for paragraph in about.paragraphs %}
    <p>{{ paragraph | escape }}</p>
{% endfor %}
  </div>
</div>
{% endblock %}"##;

/// Template names every generator may render.
pub const TEMPLATE_NAMES: [&str; 5] = [
    "base.html",
    "home.html",
    "tags.html",
    "archive.html",
    "about.html",
];

fn get_default_template(name: &str) -> Option<&'static str> {
    match name {
        "base.html" => Some(DEFAULT_BASE),
        "home.html" => Some(DEFAULT_HOME),
        "tags.html" => Some(DEFAULT_TAGS),
        "archive.html" => Some(DEFAULT_ARCHIVE),
        "about.html" => Some(DEFAULT_ABOUT),
        _ => None,
    }
}

/// Load the page templates. A file in `template_dir` with one of the
/// [`TEMPLATE_NAMES`] replaces the embedded default of the same name.
pub fn load_templates(template_dir: &Path) -> Result<tera::Tera> {
    let mut sources: BTreeMap<&'static str, String> = BTreeMap::new();

    for name in TEMPLATE_NAMES {
        let override_path = template_dir.join(name);
        let source = if override_path.is_file() {
            tracing::debug!("using template override {}", override_path.display());
            fs::read_to_string(&override_path)?
        } else {
            get_default_template(name).unwrap_or_default().to_string()
        };
        sources.insert(name, source);
    }

    let mut tera = tera::Tera::default();

    // Disable auto-escaping: URLs would otherwise come out as `&#x2F;`.
    // Text values are escaped explicitly with the `escape` filter.
    tera.autoescape_on(vec![]);
    tera.add_raw_templates(sources.iter().map(|(name, src)| (*name, src.as_str())))?;

    Ok(tera)
}

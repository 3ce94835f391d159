use std::fmt::Write;

use crate::config::InferenceConfig;
use crate::persona::Persona;
use crate::reddit::RawActivity;
use crate::util::{escape_html, truncate_chars};

/// Characters of a URL shown as link text.
const LINK_TEXT_CHARS: usize = 30;

const STYLE: &str = r#"
      body { margin: 0; background: #f3f4f6; color: #374151; font-family: ui-sans-serif, system-ui, sans-serif; }
      .container { max-width: 56rem; margin: 0 auto; padding: 1.5rem; }
      .card { background: #fff; border-radius: 0.5rem; box-shadow: 0 10px 15px -3px rgba(0, 0, 0, 0.1); padding: 2rem; }
      .header { background: linear-gradient(to right, #36A2EB, #4BC0C0); color: #fff; padding: 1rem; border-radius: 0.5rem; margin-bottom: 1.5rem; text-align: center; }
      .header h1 { margin: 0; font-size: 1.875rem; }
      .header p { margin: 0.25rem 0 0; font-size: 1.125rem; }
      .grid { display: grid; grid-template-columns: 1fr; gap: 1.5rem; margin-bottom: 1.5rem; }
      @media (min-width: 768px) { .grid { grid-template-columns: 1fr 1fr; } }
      .section { background: #f9fafb; padding: 1rem; border-radius: 0.5rem; box-shadow: 0 1px 2px rgba(0, 0, 0, 0.05); }
      .section + .section, .grid + .section, .section + .grid { margin-top: 1.5rem; }
      .section h2 { margin: 0 0 0.5rem; font-size: 1.25rem; color: #1d4ed8; }
      .section p { margin: 0.25rem 0; overflow-wrap: anywhere; }
      .section ul { margin: 0; padding-left: 1.25rem; }
      .section a { color: #2563eb; text-decoration: none; word-break: break-all; }
      .section a:hover { text-decoration: underline; }
      footer { margin-top: 1.5rem; text-align: center; color: #4b5563; }
"#;

/// Standalone HTML page for a persona. Sources are recomputed from `raw`.
pub fn render_html(persona: &Persona, raw: &RawActivity, config: &InferenceConfig) -> String {
    let handle = escape_html(&raw.handle);
    let field = |value: &str| escape_html(value);

    let mut links = String::new();
    for url in raw.source_urls(config.source_posts, config.source_comments) {
        let _ = write!(
            links,
            r#"<li><a href="{}" target="_blank" rel="noopener noreferrer">{}...</a></li>"#,
            escape_html(&url),
            escape_html(truncate_chars(&url, LINK_TEXT_CHARS)),
        );
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>User Persona for u/{handle}</title>
    <style>{STYLE}    </style>
  </head>
  <body>
    <div class="container">
      <div class="card">
        <div class="header">
          <h1>User Persona: u/{handle}</h1>
          <p>{name}</p>
        </div>
        <div class="grid">
          <div class="section">
            <h2>About</h2>
            <p>{about}</p>
          </div>
          <div class="section">
            <h2>Details</h2>
            <p><strong>Age:</strong> {age}</p>
            <p><strong>Occupation:</strong> {occupation}</p>
            <p><strong>Place:</strong> {place}</p>
            <p><strong>Status:</strong> {status}</p>
          </div>
        </div>
        <div class="section">
          <h2>Interests</h2>
          <p>{interests}</p>
        </div>
        <div class="grid">
          <div class="section">
            <h2>Motivations &amp; Goals</h2>
            <p><strong>Motivations:</strong> {motivations}</p>
            <p><strong>Goals:</strong> {goals}</p>
          </div>
          <div class="section">
            <h2>Behaviors &amp; Habits</h2>
            <p><strong>Behaviors:</strong> {behaviors}</p>
            <p><strong>Habits:</strong> {habits}</p>
          </div>
        </div>
        <div class="section">
          <h2>Skills &amp; Personality</h2>
          <p><strong>Skills:</strong> {skills}</p>
          <p><strong>Personality:</strong> {personality}</p>
          <p><strong>Frustrations:</strong> {frustrations}</p>
        </div>
        <div class="section">
          <h2>Sources</h2>
          <ul>{links}</ul>
        </div>
      </div>
      <footer>
        <p>Generated by redpersona | u/{handle}</p>
      </footer>
    </div>
  </body>
</html>
"#,
        name = field(&persona.name),
        about = field(&persona.about),
        age = field(&persona.age),
        occupation = field(&persona.occupation),
        place = field(&persona.place),
        status = field(&persona.status),
        interests = field(&persona.interests),
        motivations = field(&persona.motivations),
        goals = field(&persona.goals),
        behaviors = field(&persona.behaviors),
        habits = field(&persona.habits),
        skills = field(&persona.skills),
        personality = field(&persona.personality),
        frustrations = field(&persona.frustrations),
    )
}

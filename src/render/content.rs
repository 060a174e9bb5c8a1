// Static page content.
// Document head, stylesheet and profile sections surrounding the project list.

use super::escape_html;

const STYLE: &str = r#"
    <style>
    :root {
        --color-primary: #393939;
        --color-secondary: #131313;
    }
    *, ::after, ::before {
        box-sizing: border-box;
    }
    a {
        text-decoration: none;
    }
    a:hover {
        text-decoration: underline;
    }
    html {
        background-color: white;
        color: var(--color-primary);
    }
    .bordered {
        margin: 10px 0;
        padding: 25px 15px;
        border: 1px solid var(--color-primary);
    }
    fieldset > legend {
        text-decoration: underline;
    }
    #hobby-projects .project-container {
        display: grid;
        grid-template-columns: repeat(auto-fit, minmax(300px, 1fr));
        grid-gap: 15px;
    }
    #hobby-projects .project-container fieldset {
        display: grid;
        grid-template-rows: 1fr auto;
    }
    #hobby-projects .project-container fieldset .main {
        font-style: italic;
    }
    #hobby-projects .project-container fieldset .footer {
        display: flex;
        flex-direction: column;
    }
    </style>
"#;

/// A labelled contact link shown under the page header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub label: String,
    pub link: String,
    pub text: String,
}

/// The person the page is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub contacts: Vec<Contact>,
    /// Extra `(title, html)` sections rendered after the project list.
    pub sections: Vec<(String, String)>,
}

impl Profile {
    /// A minimal profile for a GitHub account.
    pub fn for_login(login: &str) -> Self {
        let github = format!("https://github.com/{}", login);
        let site = format!("https://{}.github.io", login);
        Self {
            name: login.to_string(),
            contacts: vec![
                Contact {
                    label: "github".to_string(),
                    link: github.clone(),
                    text: github,
                },
                Contact {
                    label: "personal".to_string(),
                    link: site.clone(),
                    text: site,
                },
            ],
            sections: Vec::new(),
        }
    }
}

/// A titled page section; the id is the kebab-cased title.
pub fn section(title: &str, children: &str) -> String {
    let id = title
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-");
    format!(
        r#"
    <section id="{id}">
        <h3><u>{title}</u></h3>
        {children}
    </section>
    "#,
        title = escape_html(title),
    )
}

/// A single `label: link` line.
pub fn info(label: &str, link: &str, text: &str) -> String {
    format!(
        r#"<div>{}: <a target="_blank" href="{}">{}</a></div>"#,
        escape_html(label),
        escape_html(link),
        escape_html(text)
    )
}

/// Wrap `body` in the full document with head and stylesheet.
pub fn document(title: &str, body: &str) -> String {
    format!(
        r#"
<!DOCTYPE html>
<html lang="en">
<head>
  <title>{title}</title>
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <meta charset="UTF-8" />
  {STYLE}
</head>
<body>
  {body}
</body>
</html>
"#,
        title = escape_html(title),
    )
}

/// The page body: header, contacts, the project list, then any extra sections.
pub fn profile_body(profile: &Profile, projects: &str) -> String {
    let contacts: String = profile
        .contacts
        .iter()
        .map(|c| info(&c.label, &c.link, &c.text))
        .collect::<Vec<_>>()
        .join("\n");
    let sections: String = profile
        .sections
        .iter()
        .map(|(title, children)| section(title, children))
        .collect();

    format!(
        r#"
    <header><h2>{name}</h2></header>
    <main>
        <section id="info" class="bordered">
            {contacts}
        </section>
        {projects}
        {sections}
    </main>
    "#,
        name = escape_html(&profile.name),
        projects = section(
            "Hobby Projects",
            &format!(r#"<div class="project-container">{}</div>"#, projects)
        ),
    )
}

// Per-repository HTML fragment.

use crate::record::RepositoryRecord;

use super::escape_html;

/// Render one repository as a project card.
pub fn repository_fragment(repo: &RepositoryRecord) -> String {
    let url = escape_html(&repo.url);
    format!(
        r#"
        <fieldset>
            <legend>{name}</legend>
            <div class="main">
                {description}<br /><br />
            </div>
            <div class="footer">
                <small>
                    <a target="_blank" href="{url}">{url}</a>
                </small>
                <code>Written&nbsp;in:&nbsp;{languages}</code>
            </div>
        </fieldset>
        "#,
        name = escape_html(&repo.name),
        description = escape_html(&repo.description),
        languages = escape_html(&repo.languages_joined()),
    )
}

/// Render every repository, in order, back to back.
pub fn repository_fragments(repos: &[RepositoryRecord]) -> String {
    repos.iter().map(repository_fragment).collect()
}

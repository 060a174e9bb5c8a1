// Built-in profile page renderer.
// Concatenates the repository fragments into the static page and minifies the result.

use crate::error::Result;
use crate::record::RepositoryRecord;

use super::content::{Profile, document, profile_body};
use super::fragment::repository_fragments;
use super::{Renderer, minify};

pub struct PageRenderer {
    profile: Profile,
}

impl PageRenderer {
    pub fn new(profile: Profile) -> Self {
        Self { profile }
    }
}

impl Renderer for PageRenderer {
    fn render(&self, repos: &[RepositoryRecord]) -> Result<String> {
        let projects = repository_fragments(repos);
        let body = profile_body(&self.profile, &projects);
        Ok(minify(&document(&self.profile.name, &body)))
    }
}

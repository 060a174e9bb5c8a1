// GitHub API module.
// Provides the GraphQL client, query document and response types for pinned repositories.

pub mod client;
pub mod endpoints;
pub mod query;
pub mod types;

pub use client::GraphQlClient;
pub use endpoints::{PinnedRepositories, RepositorySource};
#[allow(unused_imports)]
pub use types::{LanguageConnection, LanguageNode, RawRepository};

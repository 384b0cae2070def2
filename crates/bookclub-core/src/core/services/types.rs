use std::fmt;
use std::str::FromStr;

/// Catalog resources served by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Books,
    Authors,
    Genres,
}

impl Resource {
    pub const ALL: [Resource; 3] = [Resource::Books, Resource::Authors, Resource::Genres];

    pub fn name(&self) -> &'static str {
        match self {
            Resource::Books => "books",
            Resource::Authors => "authors",
            Resource::Genres => "genres",
        }
    }

    pub fn singular(&self) -> &'static str {
        match self {
            Resource::Books => "book",
            Resource::Authors => "author",
            Resource::Genres => "genre",
        }
    }

    /// API path of the list endpoint
    pub fn path(&self) -> String {
        format!("/{}", self.name())
    }

    pub fn item_path(&self, id: u64) -> String {
        format!("/{}/{}", self.name(), id)
    }

    pub fn search_placeholder(&self) -> String {
        format!("Filter {}...", self.name())
    }

    pub fn next(&self) -> Resource {
        match self {
            Resource::Books => Resource::Authors,
            Resource::Authors => Resource::Genres,
            Resource::Genres => Resource::Books,
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Resource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resource::ALL
            .into_iter()
            .find(|r| r.name() == s || r.singular() == s)
            .ok_or_else(|| format!("unknown resource '{}' (expected books, authors or genres)", s))
    }
}

//! Layout constants.

pub mod main {
    /// Breadcrumb header, including borders.
    pub const HEADER_HEIGHT: u16 = 3;

    pub const TOOLBAR_HEIGHT: u16 = 3;

    pub const STATUS_BAR_HEIGHT: u16 = 3;
}

pub mod table {
    /// Height of one row in terminal lines.
    pub const ROW_HEIGHT: u32 = 1;

    /// Fetch the next page when fewer rows than this remain below the viewport.
    pub const FETCH_THRESHOLD_ROWS: u64 = 10;

    /// Rows moved by PgUp/PgDn when the viewport is unknown.
    pub const DEFAULT_PAGE_JUMP: usize = 10;
}

//! Output generation.
//!
//! # Submodules
//!
//! - [`html`]: Splices the ranked items into the static page's `NEWS_DATA`
//!   block and refreshes its date markers
//!
//! # Output Structure
//!
//! ```text
//! index.html
//! └── <script>
//!     ├── const NEWS_DATA = [ {...}, {...} ];   # replaced every run
//!     └── date: 'YYYY-MM-DD'                    # rewritten to today
//! ```

pub mod html;

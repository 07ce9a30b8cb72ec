// Module exports for pure logic
pub mod browser;             // Application object and command dispatch
pub mod closed_tabs;         // Recently closed stack
pub mod favicon;
pub mod list_store;          // Persistence layer
pub mod lists;               // History and bookmarks
pub mod navigation;
pub mod presentation;        // Render model and UI commands
pub mod relay;
pub mod surface;             // Embedding surface seam
pub mod tabs;                // Session registry
pub mod title;

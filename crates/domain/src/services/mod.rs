pub mod renderer;

pub use renderer::{
    renderer_for, CsvRenderer, DocumentRenderer, ExportFormat, JsonRenderer, RenderError,
    RenderedArtifact,
};

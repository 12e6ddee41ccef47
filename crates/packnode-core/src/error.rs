use thiserror::Error;

#[derive(Debug, Error)]
pub enum PackError {
    #[error("Invalid canvas: {width}x{height} (width and height must be positive)")]
    InvalidCanvas { width: u32, height: u32 },
    #[error("Invalid request: {width}x{height} (width and height must be positive)")]
    InvalidRequest { width: u32, height: u32 },
    #[error("Rectangle {width}x{height} does not fit in the remaining free space")]
    DoesNotFit { width: u32, height: u32 },
    #[error(
        "Canvas {canvas_width}x{canvas_height} too small, cannot insert '{key}' ({width}x{height})"
    )]
    OutOfSpace {
        key: String,
        width: u32,
        height: u32,
        canvas_width: u32,
        canvas_height: u32,
    },
    #[error("Invalid size '{0}': value must be w,h or w:h or wxh")]
    InvalidSize(String),
    #[error("Invalid request line: {0}")]
    InvalidRequestLine(String),
    #[error("Nothing to pack")]
    Empty,
}

pub type Result<T> = std::result::Result<T, PackError>;

// Copyright @yucwang 2026

use thiserror::Error;

use crate::io::obj_utils::ObjLoadError;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("OBJ load error: {0}")]
    ObjLoad(#[from] ObjLoadError),

    #[error("EXR write error: {0}")]
    Exr(#[from] exr::error::Error),

    #[error("image write error: {0}")]
    Image(#[from] image::ImageError),

    #[error("invalid render settings: {0}")]
    InvalidSettings(String),
}

pub type Result<T> = std::result::Result<T, RenderError>;

//! Crate error types.
//!
//! Content errors surface when the surrounding application hands over a
//! malformed question bank. Render errors come from WebGPU setup and
//! per-frame presentation; the frame scheduler logs the latter and keeps the
//! simulation running.

use std::fmt;

/// A question bank failed validation or could not be parsed
#[derive(Debug)]
pub enum ContentError {
    /// The bank holds no questions at all
    EmptyBank,
    /// A question has a blank prompt
    EmptyPrompt { index: usize },
    /// A question has a blank correct answer
    EmptyAnswer { index: usize },
    /// A multiple-choice question needs at least two options
    TooFewOptions { index: usize, got: usize },
    /// The answer index points past the option list
    AnswerOutOfRange {
        index: usize,
        answer: usize,
        options: usize,
    },
    /// Two options carry the same text, so "exactly one correct" can't hold
    DuplicateOption { index: usize, option: String },
    /// JSON input could not be decoded
    Parse(serde_json::Error),
}

impl fmt::Display for ContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentError::EmptyBank => write!(f, "question bank is empty"),
            ContentError::EmptyPrompt { index } => {
                write!(f, "question {} has an empty prompt", index)
            }
            ContentError::EmptyAnswer { index } => {
                write!(f, "question {} has an empty answer", index)
            }
            ContentError::TooFewOptions { index, got } => write!(
                f,
                "question {} has {} option(s), need at least 2",
                index, got
            ),
            ContentError::AnswerOutOfRange {
                index,
                answer,
                options,
            } => write!(
                f,
                "question {} answer index {} is out of range for {} options",
                index, answer, options
            ),
            ContentError::DuplicateOption { index, option } => {
                write!(f, "question {} lists option '{}' twice", index, option)
            }
            ContentError::Parse(e) => write!(f, "invalid question bank JSON: {}", e),
        }
    }
}

impl std::error::Error for ContentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ContentError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ContentError {
    fn from(e: serde_json::Error) -> Self {
        ContentError::Parse(e)
    }
}

/// WebGPU setup or presentation failed
#[derive(Debug)]
pub enum RenderError {
    CreateSurface(wgpu::CreateSurfaceError),
    RequestAdapter(wgpu::RequestAdapterError),
    RequestDevice(wgpu::RequestDeviceError),
    /// The surface reported no usable texture format
    NoSurfaceFormat,
    Surface(wgpu::SurfaceError),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::CreateSurface(e) => write!(f, "failed to create surface: {}", e),
            RenderError::RequestAdapter(e) => write!(f, "no suitable GPU adapter: {}", e),
            RenderError::RequestDevice(e) => write!(f, "failed to create device: {}", e),
            RenderError::NoSurfaceFormat => write!(f, "surface supports no texture formats"),
            RenderError::Surface(e) => write!(f, "surface error: {}", e),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<wgpu::SurfaceError> for RenderError {
    fn from(e: wgpu::SurfaceError) -> Self {
        RenderError::Surface(e)
    }
}

impl From<wgpu::CreateSurfaceError> for RenderError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        RenderError::CreateSurface(e)
    }
}

impl From<wgpu::RequestAdapterError> for RenderError {
    fn from(e: wgpu::RequestAdapterError) -> Self {
        RenderError::RequestAdapter(e)
    }
}

impl From<wgpu::RequestDeviceError> for RenderError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        RenderError::RequestDevice(e)
    }
}

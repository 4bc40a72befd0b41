use gtk4::glib;
use thiserror::Error;

pub type AppResult<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to initialize GTK")]
    GtkInit(#[from] glib::BoolError),
    #[error("application exited with failure")]
    Exit,
}

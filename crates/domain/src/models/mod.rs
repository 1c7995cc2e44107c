//! Domain models and request/response DTOs.

pub mod aturan_periode;
pub mod auth;
pub mod honorarium;
pub mod import;
pub mod jabatan;
pub mod kegiatan;
pub mod laporan;
pub mod mitra;
pub mod pagination;
pub mod perencanaan;
pub mod penugasan;
pub mod satuan;
pub mod spk_setting;
pub mod system_setting;
pub mod template_spk;
pub mod user;

pub use aturan_periode::*;
pub use auth::*;
pub use honorarium::*;
pub use import::*;
pub use jabatan::*;
pub use kegiatan::*;
pub use laporan::*;
pub use mitra::*;
pub use pagination::*;
pub use perencanaan::*;
pub use penugasan::*;
pub use satuan::*;
pub use spk_setting::*;
pub use system_setting::*;
pub use template_spk::*;
pub use user::*;

//! HTTP route handlers.

pub mod aturan_periode;
pub mod auth;
pub mod health;
pub mod honorarium;
pub mod jabatan;
pub mod kegiatan;
pub mod laporan;
pub mod mitra;
pub mod penugasan;
pub mod perencanaan;
pub mod satuan;
pub mod spk_setting;
pub mod subkegiatan;
pub mod system_setting;
pub mod template_spk;
pub mod users;

//! Database row mappings.

mod aturan_periode;
mod honorarium;
mod jabatan;
mod kegiatan;
mod laporan;
mod mitra;
mod penugasan;
mod perencanaan;
mod satuan;
mod spk_setting;
mod system_setting;
mod template_spk;
mod user;

pub use aturan_periode::*;
pub use honorarium::*;
pub use jabatan::*;
pub use kegiatan::*;
pub use laporan::*;
pub use mitra::*;
pub use penugasan::*;
pub use perencanaan::*;
pub use satuan::*;
pub use spk_setting::*;
pub use system_setting::*;
pub use template_spk::*;
pub use user::*;

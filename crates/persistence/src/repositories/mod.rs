//! Repository implementations.

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

pub use aturan_periode::AturanPeriodeRepository;
pub use honorarium::HonorariumRepository;
pub use jabatan::JabatanRepository;
pub use kegiatan::KegiatanRepository;
pub use laporan::LaporanRepository;
pub use mitra::{MitraDeleteOutcome, MitraRepository};
pub use penugasan::PenugasanRepository;
pub use perencanaan::PerencanaanRepository;
pub use satuan::SatuanRepository;
pub use spk_setting::SpkSettingRepository;
pub use system_setting::SystemSettingRepository;
pub use template_spk::TemplateSpkRepository;
pub use user::UserRepository;

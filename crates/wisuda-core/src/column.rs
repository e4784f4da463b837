//! The fixed participant schema and the header dictionary that maps loosely
//! labelled spreadsheet columns onto it.
//!
//! Every table column other than the key pair (`npm`, `periode`) is a
//! [`Column`]. Each column carries a static [`ColumnKind`] that decides which
//! coercer fills its normalized value.

// ─── Column kinds ────────────────────────────────────────────────────────────

/// How a column's normalized value is produced from a spreadsheet cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
  Text,
  Bool,
  Date,
  Int,
  Float,
}

// ─── Columns ─────────────────────────────────────────────────────────────────

/// A non-key attribute column, in storage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
  Fakultas,
  Prodi,
  Program,
  StatusAwal,
  MhsAngkatan,
  PesertaValid,
  Nama,
  JenisKelamin,
  UkuranToga,
  Catatan,
  Email,
  Telepon1,
  Telepon2,
  TempatLahir,
  TanggalLahir,
  TanggalLulus,
  MasaStudiBulan,
  MasaStudiTahun,
  NamaAyah,
  PekerjaanOrtu,
  JabatanOrtu,
  Ipk,
  Sks,
  Predikat,
  JudulTaSkripsi,
  CatatanUpt,
  CatatanRc,
  CatatanDpk,
  CatatanBpc,
  CatatanDaak,
  ApproveUpt,
  ApproveRc,
  ApproveDpk,
  ApproveBpc,
  ApproveDaak,
}

impl Column {
  /// Every attribute column, in the order they appear in both tables.
  pub const ALL: [Column; 35] = [
    Column::Fakultas,
    Column::Prodi,
    Column::Program,
    Column::StatusAwal,
    Column::MhsAngkatan,
    Column::PesertaValid,
    Column::Nama,
    Column::JenisKelamin,
    Column::UkuranToga,
    Column::Catatan,
    Column::Email,
    Column::Telepon1,
    Column::Telepon2,
    Column::TempatLahir,
    Column::TanggalLahir,
    Column::TanggalLulus,
    Column::MasaStudiBulan,
    Column::MasaStudiTahun,
    Column::NamaAyah,
    Column::PekerjaanOrtu,
    Column::JabatanOrtu,
    Column::Ipk,
    Column::Sks,
    Column::Predikat,
    Column::JudulTaSkripsi,
    Column::CatatanUpt,
    Column::CatatanRc,
    Column::CatatanDpk,
    Column::CatatanBpc,
    Column::CatatanDaak,
    Column::ApproveUpt,
    Column::ApproveRc,
    Column::ApproveDpk,
    Column::ApproveBpc,
    Column::ApproveDaak,
  ];

  /// Position of this column within [`Column::ALL`].
  pub fn index(self) -> usize { self as usize }

  /// The SQL column name.
  pub fn name(self) -> &'static str {
    match self {
      Column::Fakultas => "fakultas",
      Column::Prodi => "prodi",
      Column::Program => "program",
      Column::StatusAwal => "status_awal",
      Column::MhsAngkatan => "mhs_angkatan",
      Column::PesertaValid => "peserta_valid",
      Column::Nama => "nama",
      Column::JenisKelamin => "jenis_kelamin",
      Column::UkuranToga => "ukuran_toga",
      Column::Catatan => "catatan",
      Column::Email => "email",
      Column::Telepon1 => "telepon1",
      Column::Telepon2 => "telepon2",
      Column::TempatLahir => "tempat_lahir",
      Column::TanggalLahir => "tanggal_lahir",
      Column::TanggalLulus => "tanggal_lulus",
      Column::MasaStudiBulan => "masa_studi_bulan",
      Column::MasaStudiTahun => "masa_studi_tahun",
      Column::NamaAyah => "nama_ayah",
      Column::PekerjaanOrtu => "pekerjaan_ortu",
      Column::JabatanOrtu => "jabatan_ortu",
      Column::Ipk => "ipk",
      Column::Sks => "sks",
      Column::Predikat => "predikat",
      Column::JudulTaSkripsi => "judul_ta_skripsi",
      Column::CatatanUpt => "catatan_upt",
      Column::CatatanRc => "catatan_rc",
      Column::CatatanDpk => "catatan_dpk",
      Column::CatatanBpc => "catatan_bpc",
      Column::CatatanDaak => "catatan_daak",
      Column::ApproveUpt => "approve_upt",
      Column::ApproveRc => "approve_rc",
      Column::ApproveDpk => "approve_dpk",
      Column::ApproveBpc => "approve_bpc",
      Column::ApproveDaak => "approve_daak",
    }
  }

  pub fn kind(self) -> ColumnKind {
    match self {
      Column::PesertaValid
      | Column::ApproveUpt
      | Column::ApproveRc
      | Column::ApproveDpk
      | Column::ApproveBpc
      | Column::ApproveDaak => ColumnKind::Bool,
      Column::TanggalLahir | Column::TanggalLulus => ColumnKind::Date,
      Column::MasaStudiBulan | Column::Sks => ColumnKind::Int,
      Column::MasaStudiTahun | Column::Ipk => ColumnKind::Float,
      _ => ColumnKind::Text,
    }
  }
}

// ─── Header dictionary ───────────────────────────────────────────────────────

/// Where a spreadsheet column lands in the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
  /// The participant identifier (`npm`).
  Npm,
  Attr(Column),
}

/// Reduce a header label to its lookup key: lower-cased, with everything
/// that is not an ASCII lowercase letter or digit removed.
pub fn normalize_label(label: &str) -> String {
  label
    .to_lowercase()
    .chars()
    .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
    .collect()
}

/// Look up a normalized header key. Known misspellings map to the same
/// column as the correct spelling.
pub fn lookup(key: &str) -> Option<Target> {
  let column = match key {
    "npm" => return Some(Target::Npm),
    "fakultas" => Column::Fakultas,
    "prodi" => Column::Prodi,
    "program" => Column::Program,
    "stausawal" | "statusawal" | "stausawalmhs" | "statusawalmhs" => {
      Column::StatusAwal
    }
    "mhsangkatan" | "angkatan" => Column::MhsAngkatan,
    "pesertavalid" => Column::PesertaValid,
    "nama" => Column::Nama,
    "jeniskelamin" => Column::JenisKelamin,
    "ukurantoga" => Column::UkuranToga,
    "catatan" => Column::Catatan,
    "email" => Column::Email,
    "telepon1" => Column::Telepon1,
    "telepon2" => Column::Telepon2,
    "tempatlahir" => Column::TempatLahir,
    "tanggallahir" => Column::TanggalLahir,
    "tanggallulus" => Column::TanggalLulus,
    "masastudibulan" => Column::MasaStudiBulan,
    "masastuditahun" => Column::MasaStudiTahun,
    "namaayah" => Column::NamaAyah,
    "pekerjaanortu" => Column::PekerjaanOrtu,
    "jabatanortu" => Column::JabatanOrtu,
    "ipk" => Column::Ipk,
    "sks" => Column::Sks,
    "predikat" => Column::Predikat,
    "judultaskripsi" => Column::JudulTaSkripsi,
    "catatanupt" => Column::CatatanUpt,
    "catatanrc" => Column::CatatanRc,
    "catatandpk" => Column::CatatanDpk,
    "catatanbpc" => Column::CatatanBpc,
    "catatandaak" => Column::CatatanDaak,
    "approveupt" => Column::ApproveUpt,
    "approverc" => Column::ApproveRc,
    "approvedpk" => Column::ApproveDpk,
    "approvebpc" => Column::ApproveBpc,
    "approvedaak" => Column::ApproveDaak,
    _ => return None,
  };
  Some(Target::Attr(column))
}

//! SQL schema for the participant store.
//!
//! Executed once at connection startup. Both tables carry the same column
//! set; only the declared types differ.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Display text exactly as exported.
CREATE TABLE IF NOT EXISTS peserta_wisuda_raw (
    npm              TEXT    NOT NULL,
    periode          INTEGER NOT NULL,
    fakultas         TEXT,
    prodi            TEXT,
    program          TEXT,
    status_awal      TEXT,
    mhs_angkatan     TEXT,
    peserta_valid    TEXT,
    nama             TEXT,
    jenis_kelamin    TEXT,
    ukuran_toga      TEXT,
    catatan          TEXT,
    email            TEXT,
    telepon1         TEXT,
    telepon2         TEXT,
    tempat_lahir     TEXT,
    tanggal_lahir    TEXT,
    tanggal_lulus    TEXT,
    masa_studi_bulan TEXT,
    masa_studi_tahun TEXT,
    nama_ayah        TEXT,
    pekerjaan_ortu   TEXT,
    jabatan_ortu     TEXT,
    ipk              TEXT,
    sks              TEXT,
    predikat         TEXT,
    judul_ta_skripsi TEXT,
    catatan_upt      TEXT,
    catatan_rc       TEXT,
    catatan_dpk      TEXT,
    catatan_bpc      TEXT,
    catatan_daak     TEXT,
    approve_upt      TEXT,
    approve_rc       TEXT,
    approve_dpk      TEXT,
    approve_bpc      TEXT,
    approve_daak     TEXT,
    updated_at       TEXT    NOT NULL,   -- RFC 3339 UTC
    PRIMARY KEY (npm, periode)
);

-- Typed values. Booleans are 0/1, dates are YYYY-MM-DD.
CREATE TABLE IF NOT EXISTS peserta_wisuda (
    npm              TEXT    NOT NULL,
    periode          INTEGER NOT NULL,
    fakultas         TEXT,
    prodi            TEXT,
    program          TEXT,
    status_awal      TEXT,
    mhs_angkatan     TEXT,
    peserta_valid    INTEGER,
    nama             TEXT,
    jenis_kelamin    TEXT,
    ukuran_toga      TEXT,
    catatan          TEXT,
    email            TEXT,
    telepon1         TEXT,
    telepon2         TEXT,
    tempat_lahir     TEXT,
    tanggal_lahir    TEXT,
    tanggal_lulus    TEXT,
    masa_studi_bulan INTEGER,
    masa_studi_tahun REAL,
    nama_ayah        TEXT,
    pekerjaan_ortu   TEXT,
    jabatan_ortu     TEXT,
    ipk              REAL,
    sks              INTEGER,
    predikat         TEXT,
    judul_ta_skripsi TEXT,
    catatan_upt      TEXT,
    catatan_rc       TEXT,
    catatan_dpk      TEXT,
    catatan_bpc      TEXT,
    catatan_daak     TEXT,
    approve_upt      INTEGER,
    approve_rc       INTEGER,
    approve_dpk      INTEGER,
    approve_bpc      INTEGER,
    approve_daak     INTEGER,
    updated_at       TEXT    NOT NULL,
    PRIMARY KEY (npm, periode)
);

CREATE INDEX IF NOT EXISTS peserta_wisuda_raw_periode_idx ON peserta_wisuda_raw(periode);
CREATE INDEX IF NOT EXISTS peserta_wisuda_periode_idx     ON peserta_wisuda(periode);

PRAGMA user_version = 1;
";

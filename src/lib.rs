//! # Iconsmith
//!
//! Generate iOS/watchOS/macOS icon sets, image sets, and web favicon sets
//! from a single source image. One decode, every required variant, plus the
//! manifest the platform tooling expects next to the files.
//!
//! # Architecture: Plan, Then Execute
//!
//! A generation request flows through four stages; everything before
//! execution is pure:
//!
//! ```text
//! 1. Probe     source image      →  native dimensions + detected format
//! 2. Plan      template + request →  resize instructions + annotated manifest
//! 3. Execute   instructions      →  resized files in the set directory
//! 4. Persist   manifest          →  Contents.json / manifest.json (+ link tags)
//! ```
//!
//! This separation exists for three reasons:
//!
//! - **Testability**: the full decision surface — dimensions, filenames,
//!   formats, manifest content — is computed without touching pixels, so unit
//!   tests exercise it directly.
//! - **Determinism**: the manifest is fixed at plan time, byte-identical
//!   across runs, regardless of how execution is scheduled.
//! - **Parallelism**: planned instructions are mutually independent, so the
//!   encode step fans out across cores with rayon.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`request`] | Request types (`AssetKind`, `Platform`, `Dimension`, `OutputFormat`) + alias normalization |
//! | [`templates`] | Embedded per-platform JSON templates, pure `(platform, kind)` lookup, web dimension lists |
//! | [`resolve`] | Per-variant dimension math: size specs × scale factors → `ResizeTarget` |
//! | [`plan`] | Instruction list + annotated manifest construction, icon-size policy, web plan |
//! | [`imaging`] | `ImageBackend` trait + pure-Rust backend (Lanczos3, memoized decode) |
//! | [`execute`] | Output directory handling + parallel instruction dispatch |
//! | [`manifest`] | Manifest and `<link>`-tag artifact persistence |
//! | [`generate`] | Orchestrator: probe → plan → execute → persist |
//! | [`config`] | Optional `iconsmith.toml` CLI defaults |
//! | [`output`] | Console formatting of reports and template listings |
//!
//! # Design Decisions
//!
//! ## Embedded Templates, Pure Lookup
//!
//! The platform catalogs are JSON documents compiled in with `include_str!`
//! and resolved through a single `match` — the set of valid
//! `(platform, kind)` combinations is closed and enumerable. Templates are
//! never mutated; annotation (attaching generated filenames) works on a deep
//! copy, so the same static document backs any number of requests.
//!
//! ## Tagged "Auto" Dimensions
//!
//! The historical tool propagated a numeric "auto" sentinel through scale
//! arithmetic. Here `Dimension::Auto | Pixels(n)` makes that total:
//! `Auto.scaled(3)` is `Auto`, and by the time instructions reach the
//! executor they are `Exact`, `FitWidth`, or `FitHeight` — a raw sentinel
//! cannot survive planning.
//!
//! ## One Decode Per Request
//!
//! Every variant derives from the same source, so the backend memoizes the
//! decode and clones pixels per resize. Variants never share a mutable
//! buffer.
//!
//! ## Icon Catalogs Are Always PNG
//!
//! Platform icon catalogs require PNG; an icon-kind request silently wins
//! over any requested output format. Free-form image sets honor the request,
//! with `source` (the default) preserving the source file's format and
//! extension.

pub mod config;
pub mod execute;
pub mod generate;
pub mod imaging;
pub mod manifest;
pub mod output;
pub mod plan;
pub mod request;
pub mod resolve;
pub mod templates;

//! Plot label strings (LaTeX math text for matplotlib-style renderers) and the physical
//! constants shared by the analysis scripts built on this crate.

use crate::{Float, PI};

/// Flux ratio label.
pub const FLUX_RATIO_LABEL: &str = r"$S_P/S_T$";
/// Peak flux label in μJy.
pub const PEAK_FLUX_LABEL: &str = r"$S_P$ $[\mathrm{\mu Jy}]$";
/// Total flux label in μJy.
pub const TOTAL_FLUX_LABEL: &str = r"$S_T$ $[\mathrm{\mu Jy}]$";
/// Signal-to-noise ratio label.
pub const SNR_LABEL: &str = r"$SNR$";
/// Decadic-log signal-to-noise ratio label.
pub const LOG_SNR_LABEL: &str = r"$\mathrm{lg}\,SNR$";
/// Distance label in degrees.
pub const DISTANCE_LABEL: &str = r"$d\,\mathrm{[deg]}$";
/// Arcsecond symbol.
pub const ARCSEC_SYMBOL: &str = " '' ";
/// Arcsecond unit label.
pub const ARCSEC_LABEL: &str = r"$\mathrm{[ '' ]}$";
/// Degree unit label.
pub const DEG_LABEL: &str = r"$\mathrm{[deg]}$";
/// Right ascension offset label in arcseconds.
pub const RA_OFFSET_LABEL: &str = r"Right ascension offset $\mathrm{[ '' ]}$";
/// Declination offset label in arcseconds.
pub const DEC_OFFSET_LABEL: &str = r"Declination offset $\mathrm{[ '' ]}$";
/// Solar mass symbol.
pub const SOLAR_MASS_SYMBOL: &str = r"\mathrm{M_{\odot}}";
/// Inverse year symbol.
pub const INVERSE_YEAR_SYMBOL: &str = r"\mathrm{yr^{-1}}";
/// Stellar mass label in solar masses.
pub const STELLAR_MASS_LABEL: &str = r"$ M_{\ast}\,[\mathrm{M_{\odot}}]$";
/// Star-formation rate label in solar masses per year.
pub const SFR_LABEL: &str = r"$SFR\,[\mathrm{M_{\odot}}\mathrm{yr^{-1}}]$";
/// Normalized log-flux label.
pub const NORMALIZED_LOG_FLUX_LABEL: &str = "Normalized log-flux";
/// Gigahertz unit label.
pub const GHZ_LABEL: &str = r"$[\mathrm{GHz}]$";
/// Rest-frame frequency label in GHz.
pub const REST_FREQUENCY_LABEL: &str = r"$\nu_{\mathrm{rest}}$$[\mathrm{GHz}]$";

/// One microjansky in janskys.
pub const MICRO_JY: Float = 1e-6;
/// One millijansky in janskys.
pub const MILLI_JY: Float = 1e-3;
/// One arcsecond in degrees.
pub const ARCSEC: Float = 1.0 / 3600.0;
/// Degrees-to-radians conversion factor.
pub const DEG_TO_RAD: Float = PI / 180.0;
/// Median and ±1σ percentiles of a sample, in percent.
pub const SIGMA_PERCENTILES: [Float; 3] = [50.0, 15.87, 84.13];
/// Lower 1σ, median, and upper 1σ quantiles of a sample.
pub const SIGMA_QUANTILES: [Float; 3] = [0.16, 0.5, 0.84];

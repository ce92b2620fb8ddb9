use candle_core::Device;

#[cfg(any(feature = "metal", feature = "cuda"))]
use tracing::{info, warn};

#[cfg(not(any(feature = "metal", feature = "cuda")))]
use tracing::debug;

/// Selects the compute device based on enabled features, falling back to CPU.
///
/// Reference vectors and per-article embeddings are small enough that CPU is
/// always a working fallback; GPU failures are logged, never fatal.
pub fn select_device() -> Device {
    #[cfg(feature = "metal")]
    {
        match Device::new_metal(0) {
            Ok(device) => {
                info!("Using Metal GPU acceleration");
                return device;
            }
            Err(e) => {
                warn!(error = %e, "Metal device unavailable, falling back");
            }
        }
    }

    #[cfg(feature = "cuda")]
    {
        match Device::new_cuda(0) {
            Ok(device) => {
                info!("Using CUDA GPU acceleration");
                return device;
            }
            Err(e) => {
                warn!(error = %e, "CUDA device unavailable, falling back");
            }
        }
    }

    #[cfg(not(any(feature = "metal", feature = "cuda")))]
    debug!("No GPU backend compiled, using CPU");

    Device::Cpu
}

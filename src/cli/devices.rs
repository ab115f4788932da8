use burn::backend::libtorch::LibTorchDevice;

/// Resolve a device name ("cpu", "cuda", "cuda:N", "mps") to a LibTorch device
pub fn libtorch_device(name: &str) -> Result<LibTorchDevice, DeviceError> {
    match name.to_lowercase().as_str() {
        "cpu" => Ok(LibTorchDevice::Cpu),
        "cuda" | "gpu" => Ok(LibTorchDevice::Cuda(0)),
        "mps" => Ok(LibTorchDevice::Mps),
        other => other
            .strip_prefix("cuda:")
            .and_then(|index| index.parse::<usize>().ok())
            .map(LibTorchDevice::Cuda)
            .ok_or_else(|| DeviceError::Unknown(name.to_string())),
    }
}

/// Device Error
#[derive(thiserror::Error, Debug)]
pub enum DeviceError {
    /// No device found for the given string
    #[error("no device found for {0}")]
    Unknown(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_devices() {
        assert_eq!(libtorch_device("CPU").unwrap(), LibTorchDevice::Cpu);
        assert_eq!(libtorch_device("cuda").unwrap(), LibTorchDevice::Cuda(0));
        assert_eq!(libtorch_device("cuda:2").unwrap(), LibTorchDevice::Cuda(2));
        assert!(libtorch_device("tpu").is_err());
    }
}

use std::io::Cursor;

use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use tracing::info;

use crate::error::AppError;
use crate::models::UploadedImage;

/// A frame-producing device. This is the seam where a platform camera
/// backend would plug in; the demo ships only [`SyntheticCamera`].
pub trait CameraDevice: Send {
    /// Bring the device online. Fails when the device is unavailable or the
    /// user refused permission.
    fn open(&mut self) -> Result<(), AppError>;

    /// Read one frame. Valid only while the device is open.
    fn read_frame(&mut self) -> Result<DynamicImage, AppError>;

    /// Release the device handle.
    fn close(&mut self);
}

/// An acquired camera stream.
///
/// The device handle is the one external mutable resource in the app, so its
/// acquisition and release are paired on every exit path: `cancel`,
/// `snapshot`, and teardown all run through `Drop`.
#[derive(Debug)]
pub struct CameraStream<D: CameraDevice> {
    device: Option<D>,
}

impl<D: CameraDevice> CameraStream<D> {
    /// Open the device and take ownership of it for the stream's lifetime.
    pub fn acquire(mut device: D) -> Result<Self, AppError> {
        device.open()?;
        info!("camera stream acquired");
        Ok(Self {
            device: Some(device),
        })
    }

    /// Capture a frame, encode it as JPEG, and release the stream. The frame
    /// goes through the same validation path as a file upload.
    pub fn snapshot(mut self) -> Result<UploadedImage, AppError> {
        // Invariant: `device` is Some until Drop takes it.
        let device = self
            .device
            .as_mut()
            .ok_or_else(|| AppError::CameraAccessDenied("stream already released".to_string()))?;
        let frame = device.read_frame()?;

        let mut buf = Vec::new();
        frame
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Jpeg)
            .map_err(|e| {
                AppError::CameraAccessDenied(format!("failed to encode captured frame: {e}"))
            })?;

        super::accept_upload("camera-capture.jpg", buf)
        // `self` drops here, closing the device.
    }

    /// Release the stream without capturing.
    pub fn cancel(self) {}
}

impl<D: CameraDevice> Drop for CameraStream<D> {
    fn drop(&mut self) {
        if let Some(mut device) = self.device.take() {
            device.close();
            info!("camera stream released");
        }
    }
}

/// Stand-in device rendering a flat gradient frame. Lets the demo exercise
/// the acquire/capture/release lifecycle without a physical camera.
#[derive(Debug)]
pub struct SyntheticCamera {
    open: bool,
    width: u32,
    height: u32,
}

impl SyntheticCamera {
    pub fn new() -> Self {
        Self {
            open: false,
            width: 640,
            height: 480,
        }
    }
}

impl Default for SyntheticCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraDevice for SyntheticCamera {
    fn open(&mut self) -> Result<(), AppError> {
        self.open = true;
        Ok(())
    }

    fn read_frame(&mut self) -> Result<DynamicImage, AppError> {
        if !self.open {
            return Err(AppError::CameraAccessDenied("device not open".to_string()));
        }
        let (w, h) = (self.width, self.height);
        let frame = ImageBuffer::from_fn(w, h, |x, y| {
            Rgb([
                (x * 255 / w) as u8,
                (y * 255 / h) as u8,
                90u8,
            ])
        });
        Ok(DynamicImage::ImageRgb8(frame))
    }

    fn close(&mut self) {
        self.open = false;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::models::MediaType;

    /// Device that counts open/close calls, for lifecycle assertions.
    #[derive(Debug)]
    struct CountingDevice {
        fail_open: bool,
        opens: Arc<AtomicUsize>,
        closes: Arc<AtomicUsize>,
    }

    impl CountingDevice {
        fn new() -> (Self, Arc<AtomicUsize>, Arc<AtomicUsize>) {
            let opens = Arc::new(AtomicUsize::new(0));
            let closes = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    fail_open: false,
                    opens: opens.clone(),
                    closes: closes.clone(),
                },
                opens,
                closes,
            )
        }
    }

    impl CameraDevice for CountingDevice {
        fn open(&mut self) -> Result<(), AppError> {
            if self.fail_open {
                return Err(AppError::CameraAccessDenied("permission denied".to_string()));
            }
            self.opens.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn read_frame(&mut self) -> Result<DynamicImage, AppError> {
            Ok(DynamicImage::ImageRgb8(ImageBuffer::from_fn(
                16,
                16,
                |_, _| Rgb([10u8, 20, 30]),
            )))
        }

        fn close(&mut self) {
            self.closes.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn release_on_cancel() {
        let (device, opens, closes) = CountingDevice::new();
        let stream = CameraStream::acquire(device).unwrap();
        assert_eq!(opens.load(Ordering::SeqCst), 1);
        assert_eq!(closes.load(Ordering::SeqCst), 0);

        stream.cancel();
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn release_on_successful_capture() {
        let (device, _opens, closes) = CountingDevice::new();
        let stream = CameraStream::acquire(device).unwrap();
        let image = stream.snapshot().unwrap();

        assert_eq!(closes.load(Ordering::SeqCst), 1);
        assert_eq!(image.media_type, MediaType::Jpeg);
        assert_eq!(image.file_name, "camera-capture.jpg");
    }

    #[test]
    fn release_on_teardown() {
        let (device, _opens, closes) = CountingDevice::new();
        {
            let _stream = CameraStream::acquire(device).unwrap();
        }
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn failed_acquire_surfaces_access_denied() {
        let (mut device, opens, closes) = CountingDevice::new();
        device.fail_open = true;
        let err = CameraStream::acquire(device).unwrap_err();
        assert!(matches!(err, AppError::CameraAccessDenied(_)));
        assert_eq!(opens.load(Ordering::SeqCst), 0);
        // Nothing was acquired, so there is nothing to release.
        assert_eq!(closes.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn synthetic_camera_snapshot_passes_validation() {
        let stream = CameraStream::acquire(SyntheticCamera::new()).unwrap();
        let image = stream.snapshot().unwrap();
        assert_eq!(image.media_type, MediaType::Jpeg);
        assert!(!image.is_empty());
    }
}

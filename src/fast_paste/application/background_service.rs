use std::path::Path;
use std::sync::Arc;

use super::error::ApplicationError;
use crate::domain::image_processor_trait::ImageProcessor;
use crate::domain::report::RemovalReport;
use crate::domain::threshold::Threshold;
use crate::infrastructure::file_storage::LocalFileStorage;

/// Converts near-white background pixels to transparency and persists the
/// result as PNG. Holds no per-run state, so one instance can serve many
/// concurrent runs.
pub struct BackgroundRemovalService {
    image_processor: Arc<dyn ImageProcessor + Send + Sync>,
    file_storage: LocalFileStorage,
}

impl BackgroundRemovalService {
    pub fn new(image_processor: Arc<dyn ImageProcessor + Send + Sync>) -> Self {
        Self {
            image_processor,
            file_storage: LocalFileStorage::new(),
        }
    }

    pub async fn remove_white_background(
        &self,
        input: &Path,
        output: &Path,
        threshold: Threshold,
    ) -> Result<RemovalReport, ApplicationError> {
        log::info!(
            "Removing white background: {} -> {} (threshold {})",
            input.display(),
            output.display(),
            threshold
        );

        let image_bytes = self
            .file_storage
            .read_image_impl(input)
            .await
            .map_err(ApplicationError::Decode)?;

        let mut buffer = self
            .image_processor
            .decode_rgba(&image_bytes)
            .map_err(ApplicationError::Decode)?;
        log::debug!(
            "Decoded {}x{} image with {} channels",
            buffer.width(),
            buffer.height(),
            buffer.channels()
        );

        let cleared_pixels = buffer.clear_near_white(threshold);
        log::info!(
            "Cleared {} of {} pixels ({} now transparent)",
            cleared_pixels,
            buffer.pixel_count(),
            buffer.transparent_count()
        );

        let png_bytes = self
            .image_processor
            .encode_png(&buffer)
            .map_err(ApplicationError::Encode)?;

        self.file_storage
            .save_image_impl(output, &png_bytes)
            .await
            .map_err(ApplicationError::Write)?;
        log::debug!("Wrote {} bytes to {}", png_bytes.len(), output.display());

        Ok(RemovalReport {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            width: buffer.width(),
            height: buffer.height(),
            threshold,
            total_pixels: buffer.pixel_count(),
            cleared_pixels,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::image::{RawPixelBuffer, RGBA_CHANNELS};
    use crate::domain::image_processor_trait::MockImageProcessor;
    use crate::infrastructure::error::InfrastructureError;
    use crate::infrastructure::image_processor::DefaultImageProcessor;
    use image::error::{LimitError, LimitErrorKind};
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;
    use tempfile::TempDir;

    fn write_png(path: &Path, img: &RgbaImage) {
        let mut buffer = Cursor::new(Vec::new());
        img.write_to(&mut buffer, ImageFormat::Png).unwrap();
        std::fs::write(path, buffer.into_inner()).unwrap();
    }

    fn scenario_image() -> RgbaImage {
        let mut img = RgbaImage::new(2, 2);
        img.put_pixel(0, 0, Rgba([255, 255, 255, 255]));
        img.put_pixel(1, 0, Rgba([0, 0, 0, 255]));
        img.put_pixel(0, 1, Rgba([250, 250, 250, 255]));
        img.put_pixel(1, 1, Rgba([10, 10, 10, 255]));
        img
    }

    fn real_service() -> BackgroundRemovalService {
        BackgroundRemovalService::new(Arc::new(DefaultImageProcessor::new()))
    }

    #[tokio::test]
    async fn test_two_by_two_end_to_end() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.png");
        let output = dir.path().join("out.png");
        write_png(&input, &scenario_image());
        let input_before = std::fs::read(&input).unwrap();

        let report = real_service()
            .remove_white_background(&input, &output, Threshold::new(240))
            .await
            .unwrap();

        assert_eq!(report.total_pixels, 4);
        assert_eq!(report.cleared_pixels, 2);
        assert_eq!(std::fs::read(&input).unwrap(), input_before);

        let result = image::open(&output).unwrap().to_rgba8();
        assert_eq!(
            result.into_raw(),
            vec![255, 255, 255, 0, 0, 0, 0, 255, 250, 250, 250, 0, 10, 10, 10, 255]
        );
    }

    #[tokio::test]
    async fn test_second_run_is_bitwise_identical() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.png");
        let first = dir.path().join("first.png");
        let second = dir.path().join("second.png");
        write_png(&input, &scenario_image());
        let service = real_service();

        service.remove_white_background(&input, &first, Threshold::DEFAULT).await.unwrap();
        service.remove_white_background(&first, &second, Threshold::DEFAULT).await.unwrap();

        assert_eq!(std::fs::read(&first).unwrap(), std::fs::read(&second).unwrap());
    }

    #[tokio::test]
    async fn test_missing_input_reports_decode_error() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("out.png");

        let result = real_service()
            .remove_white_background(&dir.path().join("missing.png"), &output, Threshold::DEFAULT)
            .await;

        assert!(matches!(result, Err(ApplicationError::Decode(_))));
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_corrupt_input_reports_decode_error() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.png");
        let output = dir.path().join("out.png");
        std::fs::write(&input, b"not an image").unwrap();

        let result = real_service()
            .remove_white_background(&input, &output, Threshold::DEFAULT)
            .await;

        assert!(matches!(result, Err(ApplicationError::Decode(_))));
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_unwritable_output_reports_write_error() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.png");
        write_png(&input, &scenario_image());
        let output = dir.path().join("no_such_dir").join("out.png");

        let result = real_service()
            .remove_white_background(&input, &output, Threshold::DEFAULT)
            .await;

        assert!(matches!(result, Err(ApplicationError::Write(_))));
    }

    #[tokio::test]
    async fn test_encode_failure_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.bin");
        let output = dir.path().join("out.png");
        std::fs::write(&input, [0u8; 8]).unwrap();

        let mut mock = MockImageProcessor::new();
        mock.expect_decode_rgba()
            .times(1)
            .returning(|_| Ok(RawPixelBuffer::new(1, 1, RGBA_CHANNELS, vec![255, 255, 255, 255]).unwrap()));
        mock.expect_encode_png()
            .times(1)
            .returning(|_| {
                Err(InfrastructureError::ImageLibError(image::ImageError::Limits(
                    LimitError::from_kind(LimitErrorKind::InsufficientMemory),
                )))
            });
        let service = BackgroundRemovalService::new(Arc::new(mock));

        let result = service
            .remove_white_background(&input, &output, Threshold::DEFAULT)
            .await;

        match result {
            Err(ApplicationError::Encode(InfrastructureError::ImageLibError(image::ImageError::Limits(_)))) => {}
            other => panic!("Expected ApplicationError::Encode, got {:?}", other),
        }
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_scanned_buffer_is_passed_to_encoder() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.bin");
        let output = dir.path().join("out.png");
        std::fs::write(&input, [0u8; 8]).unwrap();

        let mut mock = MockImageProcessor::new();
        mock.expect_decode_rgba().returning(|_| {
            Ok(RawPixelBuffer::new(2, 1, RGBA_CHANNELS, vec![255, 255, 255, 255, 1, 2, 3, 4]).unwrap())
        });
        mock.expect_encode_png()
            .withf(|buffer| buffer.as_bytes() == [255u8, 255, 255, 0, 1, 2, 3, 4])
            .returning(|_| Ok(vec![9, 9, 9]));
        let service = BackgroundRemovalService::new(Arc::new(mock));

        let report = service
            .remove_white_background(&input, &output, Threshold::new(254))
            .await
            .unwrap();

        assert_eq!(report.cleared_pixels, 1);
        assert_eq!(std::fs::read(&output).unwrap(), vec![9, 9, 9]);
    }

    #[tokio::test]
    async fn test_independent_runs_can_overlap() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.png");
        write_png(&input, &scenario_image());
        let service = Arc::new(real_service());

        let mut handles = Vec::new();
        for threshold in [0, 240, 255] {
            let service = Arc::clone(&service);
            let input = input.clone();
            let output = dir.path().join(format!("out_{}.png", threshold));
            handles.push(tokio::spawn(async move {
                service
                    .remove_white_background(&input, &output, Threshold::new(threshold))
                    .await
                    .map(|report| report.cleared_pixels)
            }));
        }

        let mut cleared = Vec::new();
        for handle in handles {
            cleared.push(handle.await.unwrap().unwrap());
        }
        assert_eq!(cleared, vec![3, 2, 0]);
    }
}

use custom_error::custom_error;

custom_error! {pub SceneError
    Io {source: std::io::Error} = "failed to read scene description: {source}",
    Parse {source: serde_json::Error} = "failed to parse scene description: {source}",
    UnknownMaterial {description: String} = "unknown material: {description}",
    InvalidScreen {description: String} = "invalid screen rectangle: {description}",
    EmptyCanvas = "canvas must be at least one pixel wide and one pixel high",
}

custom_error! {pub RenderError
    DegenerateRay = "ray direction has zero length",
    RaggedGrid {row: usize, expected: usize, found: usize} = "row {row} holds {found} pixels, expected {expected}",
    ThreadPool {source: rayon::ThreadPoolBuildError} = "failed to build render thread pool: {source}",
    ImageSave {source: image::ImageError} = "failed to save image: {source}",
    Scene {source: SceneError} = "{source}",
}

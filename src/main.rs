use iced::widget::image::{Handle, Viewer};
use iced::widget::{button, column, container, row, text};
use iced::{Alignment, Element, Length, Task, Theme};
use image::RgbaImage;
use rfd::FileDialog;
use std::path::PathBuf;
use tokio::task;

use antique_viewer::filter::FilterChain;
use antique_viewer::pipeline::{executor, BusyState, PipelineError, PipelineResult};

/// Main application state
///
/// The iced update loop is the UI-owning context here: every mutation
/// of the displayed image and of the busy state happens inside
/// `update`, and background work comes back as messages.
struct AntiqueViewer {
    /// The image currently on screen, in pipeline form
    source: Option<RgbaImage>,
    /// The same image as an iced handle for the viewer widget
    display: Option<Handle>,
    /// Single-in-flight guard for the filter pipeline
    busy: BusyState,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User clicked the "Open Image" button
    OpenImage,
    /// Background decode completed
    ImageLoaded(Result<RgbaImage, String>),
    /// User clicked the "Antique" button
    ApplyAntique,
    /// The filter pipeline completed with a result
    FilterFinished(PipelineResult),
}

impl AntiqueViewer {
    fn new() -> (Self, Task<Message>) {
        println!("🖼️  Antique Viewer ready");

        (
            AntiqueViewer {
                source: None,
                display: None,
                busy: BusyState::new(),
                status: "Open an image to begin.".to_string(),
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::OpenImage => {
                // Show the native file picker dialog
                let file = FileDialog::new()
                    .set_title("Select an Image")
                    .add_filter("Images", &["png", "jpg", "jpeg", "bmp", "tiff", "webp"])
                    .pick_file();

                if let Some(path) = file {
                    self.status = format!("Loading {}...", path.display());
                    return Task::perform(load_image(path), Message::ImageLoaded);
                }

                Task::none()
            }
            Message::ImageLoaded(Ok(image)) => {
                println!("🖼️  Loaded image ({}x{})", image.width(), image.height());
                self.status = format!("Loaded {}x{} image.", image.width(), image.height());
                self.show(image);
                Task::none()
            }
            Message::ImageLoaded(Err(error)) => {
                eprintln!("⚠️  {}", error);
                self.status = error;
                Task::none()
            }
            Message::ApplyAntique => {
                // Dispatcher: pull the source from the surface, guard
                // the single-in-flight rule, mark busy before any
                // asynchronous work starts.
                let Some(source) = self.source.clone() else {
                    eprintln!("⚠️  Filter request rejected: {}", PipelineError::MissingInput);
                    return Task::none();
                };

                if !self.busy.begin() {
                    println!("Filter already running, ignoring request");
                    return Task::none();
                }

                self.status = "Applying antique filter...".to_string();
                println!(
                    "Filter request accepted ({}x{})",
                    source.width(),
                    source.height()
                );

                Task::perform(
                    executor::run_async(source, FilterChain::antique()),
                    Message::FilterFinished,
                )
            }
            Message::FilterFinished(result) => {
                // Completion router: apply the result first, then clear
                // the busy state, so the indicator never disappears
                // before the image is replaced.
                match result {
                    Ok(bitmap) => {
                        println!("Setting filtered image");
                        self.status = "✅ Antique filter applied.".to_string();
                        self.show(bitmap);
                    }
                    Err(error) => {
                        eprintln!("⚠️  Filter pipeline failed: {}", error);
                        self.status = format!("Filter failed: {}", error);
                    }
                }
                self.busy.end();
                Task::none()
            }
        }
    }

    /// Replace the displayed image on both the pipeline side and the
    /// widget side.
    fn show(&mut self, image: RgbaImage) {
        self.display = Some(Handle::from_rgba(
            image.width(),
            image.height(),
            image.as_raw().clone(),
        ));
        self.source = Some(image);
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let filtering = self.busy.is_busy();

        let controls = row![
            button("Open Image")
                .on_press_maybe((!filtering).then_some(Message::OpenImage))
                .padding(10),
            button("Antique")
                .on_press_maybe(
                    (self.source.is_some() && !filtering).then_some(Message::ApplyAntique)
                )
                .padding(10),
            text(if filtering { "⏳ Filtering..." } else { "" }),
            text(&self.status).size(16),
        ]
        .spacing(20)
        .align_y(Alignment::Center);

        let viewport: Element<Message> = match &self.display {
            // The viewer widget gives us scroll-wheel zoom and drag pan
            Some(handle) => Viewer::new(handle.clone())
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            None => container(text("No image loaded").size(24))
                .width(Length::Fill)
                .height(Length::Fill)
                .center_x(Length::Fill)
                .center_y(Length::Fill)
                .into(),
        };

        column![controls, viewport].spacing(20).padding(20).into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    iced::application(
        "Antique Viewer",
        AntiqueViewer::update,
        AntiqueViewer::view,
    )
    .theme(AntiqueViewer::theme)
    .centered()
    .run_with(AntiqueViewer::new)
}

/// Decode an image file in the background.
/// Spawn-blocking because decoding is CPU-intensive.
async fn load_image(path: PathBuf) -> Result<RgbaImage, String> {
    task::spawn_blocking(move || {
        image::open(&path)
            .map(|image| image.to_rgba8())
            .map_err(|e| format!("Failed to open {}: {}", path.display(), e))
    })
    .await
    .map_err(|e| format!("Task join error: {}", e))?
}

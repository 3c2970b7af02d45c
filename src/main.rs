// SPDX-License-Identifier: MPL-2.0
use avatar_crop::cli::{CliArgs, HELP};
use avatar_crop::config::{self, PREVIEW_SIZE};
use avatar_crop::editor::{AvatarEditor, PointerEvent};
use avatar_crop::error::{Error, Result, UploadError};
use avatar_crop::logging::init_logging;
use avatar_crop::upload::{AvatarUploader, CsrfToken, UploadOutcome};
use std::process::ExitCode;
use tiny_skia::Point;

#[tokio::main]
async fn main() -> ExitCode {
    let args = match CliArgs::from_env() {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}\n\n{HELP}");
            return ExitCode::from(2);
        }
    };
    if args.help {
        print!("{HELP}");
        return ExitCode::SUCCESS;
    }

    init_logging(args.verbose, args.quiet);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: CliArgs) -> Result<()> {
    let image = args
        .image
        .clone()
        .ok_or_else(|| Error::Config("missing <IMAGE> argument".into()))?;

    let config = match &args.config {
        Some(path) => config::load_from_path(path)?,
        None => config::load()?,
    };

    let mut editor = AvatarEditor::new(&config)?;
    editor.open(image).await?;

    if let Some(percent) = args.zoom {
        editor.set_zoom(percent)?;
    }

    // Drags are replayed as a press at the preview center, one move and a release.
    #[allow(clippy::cast_precision_loss)]
    let center = PREVIEW_SIZE as f32 / 2.0;
    for &(dx, dy) in &args.drags {
        editor.pointer(PointerEvent::Down(Point::from_xy(center, center)))?;
        editor.pointer(PointerEvent::Move(Point::from_xy(center + dx, center + dy)))?;
        editor.pointer(PointerEvent::Up)?;
    }

    if let Some(session) = editor.session() {
        let (x, y) = session.offset();
        log::info!(
            "Crop ready: {}x{} image, zoom {}, offset ({x:.1}, {y:.1})",
            session.image().width(),
            session.image().height(),
            editor.slider().label()
        );
    }

    if let Some(output) = &args.output {
        let avatar = editor.export_crop_async().await?;
        avatar.save_to_file(output)?;
        log::info!(
            "Wrote {}x{} avatar ({} bytes) to {}",
            avatar.side(),
            avatar.side(),
            avatar.len(),
            output.display()
        );
    }

    let wants_upload =
        args.upload.is_some() || args.csrf_token.is_some() || args.csrf_page.is_some();
    if wants_upload {
        let server_url = args
            .upload
            .as_deref()
            .or(config.server_url.as_deref())
            .ok_or_else(|| {
                Error::Config("no server URL: pass --upload or set server_url in settings".into())
            })?;
        let token = csrf_token(&args).await?;
        let uploader = AvatarUploader::new(server_url, config.request_timeout())?;
        match editor.submit(&uploader, &token, args.cookie.as_deref()).await? {
            UploadOutcome::Redirected(url) => println!("{url}"),
            UploadOutcome::Completed { status } if (200..300).contains(&status) => {
                log::info!("Upload finished with HTTP {status}");
            }
            UploadOutcome::Completed { status } => {
                return Err(UploadError::Other(format!("server answered HTTP {status}")).into());
            }
        }
    }

    Ok(())
}

async fn csrf_token(args: &CliArgs) -> Result<CsrfToken> {
    if let Some(token) = &args.csrf_token {
        return Ok(CsrfToken::new(token.as_str()));
    }
    let Some(page) = &args.csrf_page else {
        return Err(Error::Config(
            "--upload requires --csrf-token or --csrf-page".into(),
        ));
    };
    let html = tokio::fs::read_to_string(page).await?;
    CsrfToken::from_hidden_input(&html).ok_or_else(|| {
        Error::Config(format!("no anti-forgery token found in {}", page.display()))
    })
}

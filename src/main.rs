use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{Parser, Subcommand, ValueEnum};
use taf::{
    container::{ContainerKind, IMAGE_MAGIC},
    demuxers::{ImageSequenceDemuxer, RawImageDemuxer},
    format::{read_image, write_image, FileFormat},
    muxers::ImageSequenceMuxer,
    quantization::DEFAULT_QUALITY,
    EncoderConfig, FormatError, FrameSink, ImageHeader, PartialEncoderConfig, Result, TafError,
    VideoHeader,
};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "taf",
    version,
    about = "Convert images and videos to and from Anything File containers"
)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args, Debug)]
struct EncodeOptions {
    /// 0 (smallest) to 100 (lossless); 90 and above skip quantization.
    #[arg(short, long, default_value_t = DEFAULT_QUALITY)]
    quality: u8,

    /// Encode on the calling thread only.
    #[arg(long)]
    sequential: bool,
}

impl EncodeOptions {
    fn config(&self) -> Result<EncoderConfig> {
        PartialEncoderConfig::new()
            .quality(self.quality)
            .parallel(!self.sequential)
            .build()
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// PNG or PPM image -> .tafi
    EncodeImage {
        input: PathBuf,
        output: PathBuf,
        #[command(flatten)]
        options: EncodeOptions,
    },
    /// .tafi -> PNG or PPM image (chosen by extension)
    DecodeImage { input: PathBuf, output: PathBuf },
    /// Frame images (files or one directory) -> .tafv
    EncodeVideo {
        output: PathBuf,
        #[arg(required = true)]
        frames: Vec<PathBuf>,
        #[arg(long, default_value_t = 30.0)]
        fps: f32,
        #[command(flatten)]
        options: EncodeOptions,
    },
    /// .tafv -> numbered frame images in a directory
    DecodeVideo {
        input: PathBuf,
        output_dir: PathBuf,
        #[arg(long, value_enum, default_value_t = OutputFormat::Png)]
        format: OutputFormat,
        #[arg(long, default_value = "frame")]
        prefix: String,
    },
    /// Print container headers without decoding the payload.
    Info { input: PathBuf },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    Png,
    Ppm,
}

impl From<OutputFormat> for FileFormat {
    fn from(value: OutputFormat) -> Self {
        match value {
            OutputFormat::Png => FileFormat::Png,
            OutputFormat::Ppm => FileFormat::Ppm,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|err| TafError::resource(path, err))
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).map_err(|err| TafError::resource(path, err))
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::EncodeImage {
            input,
            output,
            options,
        } => {
            let image = read_image(&input)?;
            let encoded = taf::encode_image(&image, &options.config()?)?;
            write_file(&output, &encoded)?;
            info!(
                width = image.width(),
                height = image.height(),
                bytes = encoded.len(),
                "wrote {}",
                output.display()
            );
        }
        Command::DecodeImage { input, output } => {
            let image = taf::decode_image(&read_file(&input)?)?;
            write_image(&output, &image)?;
            info!(
                width = image.width(),
                height = image.height(),
                "wrote {}",
                output.display()
            );
        }
        Command::EncodeVideo {
            output,
            frames,
            fps,
            options,
        } => {
            let config = options.config()?;
            let encoded = match frames.as_slice() {
                [directory] if directory.is_dir() => {
                    let mut demuxer = ImageSequenceDemuxer::from_directory(directory, fps)?;
                    taf::encode_stream(&mut demuxer, &config)?
                }
                [single] => {
                    let mut demuxer = RawImageDemuxer::from_frames(vec![read_image(single)?], fps);
                    taf::encode_stream(&mut demuxer, &config)?
                }
                _ => {
                    let mut demuxer = ImageSequenceDemuxer::new(frames.clone(), fps);
                    taf::encode_stream(&mut demuxer, &config)?
                }
            };
            write_file(&output, &encoded)?;
            info!(bytes = encoded.len(), "wrote {}", output.display());
        }
        Command::DecodeVideo {
            input,
            output_dir,
            format,
            prefix,
        } => {
            let bytes = read_file(&input)?;
            let mut muxer = ImageSequenceMuxer::new(&output_dir, &prefix, format.into())?;

            match taf::decode_video(&bytes) {
                Ok(video) => {
                    info!(
                        frame_rate = video.frame_rate,
                        frames = video.frames.len(),
                        "decoded video"
                    );
                    for frame in &video.frames {
                        muxer.write_frame(frame)?;
                    }
                    muxer.finish()?;
                }
                Err(TafError::TruncatedVideo { decoded, source }) => {
                    warn!(
                        frames = decoded.len(),
                        "video is truncated, writing the frames that decoded"
                    );
                    for frame in &decoded {
                        muxer.write_frame(frame)?;
                    }
                    muxer.finish()?;
                    return Err(source.into());
                }
                Err(err) => return Err(err),
            }
        }
        Command::Info { input } => {
            let bytes = read_file(&input)?;
            match ContainerKind::detect(&bytes) {
                Some(ContainerKind::Image) => {
                    let header = ImageHeader::parse(&bytes)?;
                    println!(
                        "TAFI v{} {}x{} payload {} bytes",
                        header.version,
                        header.resolution.width,
                        header.resolution.height,
                        header.payload_length
                    );
                }
                Some(ContainerKind::Video) => {
                    let header = VideoHeader::parse(&bytes)?;
                    println!(
                        "TAFV v{} {} frames at {} fps",
                        header.version, header.frame_count, header.frame_rate
                    );
                }
                None => {
                    return Err(FormatError::BadMagic {
                        expected: IMAGE_MAGIC,
                        found: bytes.iter().take(4).copied().collect(),
                    }
                    .into())
                }
            }
        }
    }

    Ok(())
}

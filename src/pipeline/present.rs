use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};

use super::Stage;
use crate::error::Result;
use crate::models::Frame;

/// Receives each stage's frame as the walkthrough produces it
pub trait Presenter {
    /// Show `frame` for `stage`; an error aborts the walkthrough
    fn present(&mut self, stage: Stage, frame: &Frame) -> Result<()>;

    /// A line of text for the user, sent before `stage` is presented
    fn note(&mut self, _stage: Stage, _message: &str) -> Result<()> {
        Ok(())
    }
}

impl<P: Presenter + ?Sized> Presenter for &mut P {
    fn present(&mut self, stage: Stage, frame: &Frame) -> Result<()> {
        (**self).present(stage, frame)
    }

    fn note(&mut self, stage: Stage, message: &str) -> Result<()> {
        (**self).note(stage, message)
    }
}

impl<P: Presenter + ?Sized> Presenter for Box<P> {
    fn present(&mut self, stage: Stage, frame: &Frame) -> Result<()> {
        (**self).present(stage, frame)
    }

    fn note(&mut self, stage: Stage, message: &str) -> Result<()> {
        (**self).note(stage, message)
    }
}

/// Writes every stage as `NN_<slug>.png` into a directory
#[derive(Debug)]
pub struct DirectoryPresenter {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl DirectoryPresenter {
    /// Use `dir` as the output directory, creating it if needed
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            written: Vec::new(),
        })
    }

    /// Output directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths written so far, in stage order
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl Presenter for DirectoryPresenter {
    fn present(&mut self, stage: Stage, frame: &Frame) -> Result<()> {
        let path = self.dir.join(stage.file_name());
        frame.save(&path)?;
        info!("{} -> {}", stage.title(), path.display());
        self.written.push(path);
        Ok(())
    }

    fn note(&mut self, _stage: Stage, message: &str) -> Result<()> {
        println!("{message}");
        Ok(())
    }
}

/// Blocks after each stage until a line is read from `input`
///
/// Wraps another presenter and mimics "press a key to continue". Once
/// `input` reaches end of file, the remaining stages run without pausing.
/// Notes go to `output` ahead of the prompt and are not forwarded.
pub struct PausingPresenter<P, R, W> {
    inner: P,
    input: R,
    output: W,
    active: bool,
}

impl<P: Presenter, R: BufRead, W: Write> PausingPresenter<P, R, W> {
    /// Prompt on `output` and wait on `input` after each stage of `inner`
    pub fn new(inner: P, input: R, output: W) -> Self {
        Self {
            inner,
            input,
            output,
            active: true,
        }
    }

    /// Whether the presenter still waits for input
    pub fn is_pausing(&self) -> bool {
        self.active
    }

    /// Unwrap the inner presenter
    pub fn into_inner(self) -> P {
        self.inner
    }
}

impl<P: Presenter, R: BufRead, W: Write> Presenter for PausingPresenter<P, R, W> {
    fn note(&mut self, _stage: Stage, message: &str) -> Result<()> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }

    fn present(&mut self, stage: Stage, frame: &Frame) -> Result<()> {
        self.inner.present(stage, frame)?;
        if !self.active {
            return Ok(());
        }

        write!(
            self.output,
            "[{}/{}] {}: press Enter to continue...",
            stage.number(),
            Stage::ALL.len(),
            stage.title()
        )?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            debug!("input closed, no longer pausing");
            self.active = false;
        }
        Ok(())
    }
}

/// Keeps every presented frame in memory
#[derive(Debug, Default)]
pub struct CollectingPresenter {
    frames: Vec<(Stage, Frame)>,
    notes: Vec<(Stage, String)>,
}

impl CollectingPresenter {
    /// Empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Presented frames in stage order
    pub fn frames(&self) -> &[(Stage, Frame)] {
        &self.frames
    }

    /// Notes received, in order
    pub fn notes(&self) -> &[(Stage, String)] {
        &self.notes
    }

    /// Frame presented for `stage`, if any
    pub fn get(&self, stage: Stage) -> Option<&Frame> {
        self.frames
            .iter()
            .find(|(s, _)| *s == stage)
            .map(|(_, frame)| frame)
    }

    /// Take ownership of the collected frames
    pub fn into_frames(self) -> Vec<(Stage, Frame)> {
        self.frames
    }
}

impl Presenter for CollectingPresenter {
    fn present(&mut self, stage: Stage, frame: &Frame) -> Result<()> {
        self.frames.push((stage, frame.clone()));
        Ok(())
    }

    fn note(&mut self, stage: Stage, message: &str) -> Result<()> {
        self.notes.push((stage, message.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn tiny_frame() -> Frame {
        Frame::gray(2, 1, vec![0, 255]).unwrap()
    }

    #[test]
    fn test_pausing_reads_one_line_per_stage() {
        let input = Cursor::new(b"\n\n".to_vec());
        let mut output = Vec::new();
        let mut pausing = PausingPresenter::new(CollectingPresenter::new(), input, &mut output);

        pausing.present(Stage::Image, &tiny_frame()).unwrap();
        pausing.present(Stage::Gray, &tiny_frame()).unwrap();
        assert!(pausing.is_pausing());

        // Input exhausted: the third stage stops pausing but still presents
        pausing.present(Stage::Edged, &tiny_frame()).unwrap();
        assert!(!pausing.is_pausing());
        pausing.present(Stage::ContourCount, &tiny_frame()).unwrap();

        let inner = pausing.into_inner();
        assert_eq!(inner.frames().len(), 4);

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("[1/9] Image: press Enter"));
        assert!(text.contains("[3/9] Edged"));
        assert!(!text.contains("[4/9]"));
    }

    #[test]
    fn test_note_is_written_before_the_prompt() {
        let input = Cursor::new(b"\n\n".to_vec());
        let mut output = Vec::new();
        let mut pausing = PausingPresenter::new(CollectingPresenter::new(), input, &mut output);

        pausing.present(Stage::Edged, &tiny_frame()).unwrap();
        pausing
            .note(Stage::ContourCount, "Number of Contours found = 3")
            .unwrap();
        pausing.present(Stage::ContourCount, &tiny_frame()).unwrap();
        assert!(pausing.into_inner().notes().is_empty());

        let text = String::from_utf8(output).unwrap();
        let edged = text.find("[3/9] Edged").unwrap();
        let count = text.find("Number of Contours found = 3\n").unwrap();
        let contours = text.find("[4/9] Contours").unwrap();
        assert!(edged < count && count < contours);
    }

    #[test]
    fn test_collecting_lookup() {
        let mut collect = CollectingPresenter::new();
        collect.present(Stage::Thresh, &tiny_frame()).unwrap();
        assert!(collect.get(Stage::Thresh).is_some());
        assert!(collect.get(Stage::Output).is_none());
    }

    #[test]
    fn test_directory_presenter_writes_png() {
        let dir = std::env::temp_dir().join(format!("cv_primer_present_{}", std::process::id()));
        let mut presenter = DirectoryPresenter::new(&dir).unwrap();
        presenter.present(Stage::Eroded, &tiny_frame()).unwrap();

        let expected = dir.join("07_eroded.png");
        assert_eq!(presenter.written(), &[expected.clone()]);
        let reloaded = image::open(&expected).unwrap().to_luma8();
        assert_eq!(reloaded.into_raw(), vec![0, 255]);
        let _ = fs::remove_dir_all(dir);
    }
}

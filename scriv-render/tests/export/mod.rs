//! Backend export tests.
//!
//! External-converter behavior is exercised with stub shell scripts so the
//! suite runs without pandoc installed. Stubs are wired through the
//! options-level tool override, which keeps tests independent of each
//! other and of the host PATH.

use scriv_render::{generate_from_markdown, GenerationOptions};
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn docx_backend_writes_a_package() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("report.docx");
    let result = generate_from_markdown(
        "# Title\n\nBody with **bold** and [a link](http://example.com).",
        "docx",
        &output,
        GenerationOptions::default(),
    );
    assert!(result.success, "error: {:?}", result.error);
    assert_eq!(result.output_path, Some(output.clone()));
    assert_eq!(result.page_count, None);
    let bytes = std::fs::read(&output).unwrap();
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn docx_backend_reports_io_failure_without_output() {
    let output = PathBuf::from("/no/such/dir/report.docx");
    let result = generate_from_markdown("text", "docx", &output, GenerationOptions::default());
    assert!(!result.success);
    assert!(result.error.is_some());
    assert!(!output.exists());
}

#[cfg(feature = "native-export")]
#[test]
fn undiscoverable_converter_is_a_structured_failure() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("report.pdf");
    let mut options = GenerationOptions::default();
    options.typeset_tool = Some(PathBuf::from("/no/such/pandoc"));

    let result = generate_from_markdown("# Doc\n\ntext", "pdf", &output, options);
    assert!(!result.success);
    let error = result.error.expect("failure must carry a message");
    assert!(!error.is_empty());
    assert!(!output.exists(), "no output file may be written");
}

#[cfg(all(unix, feature = "native-export"))]
mod unix {
    use scriv_render::{generate_from_markdown, GenerationOptions};
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::tempdir;

    /// Writes a stand-in converter that copies a fixed payload to the path
    /// following `-o`, mirroring the real converter's interface.
    fn write_stub_converter(body: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempdir().unwrap();
        let script_path = dir.path().join("fake-pandoc.sh");
        let script = format!(
            r#"#!/bin/sh
OUTPUT=""
PREV=""
for arg in "$@"; do
  if [ "$PREV" = "-o" ]; then
    OUTPUT="$arg"
  fi
  PREV="$arg"
done
if [ -z "$OUTPUT" ]; then
  echo "missing output" >&2
  exit 1
fi
{body}
"#
        );
        fs::write(&script_path, script).unwrap();
        let mut perms = fs::metadata(&script_path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&script_path, perms).unwrap();
        (dir, script_path)
    }

    fn stub_options(tool: &std::path::Path) -> GenerationOptions {
        let mut options = GenerationOptions::default();
        options.typeset_tool = Some(tool.to_path_buf());
        options
    }

    #[test]
    fn pdf_renderer_uses_converter_stub() {
        let (_dir, stub) = write_stub_converter(
            "printf '%%PDF-1.7\\n%%%%EOF\\n' > \"$OUTPUT\"\nexit 0",
        );
        let output_dir = tempdir().unwrap();
        let output = output_dir.path().join("out.pdf");

        let mut options = stub_options(&stub);
        options.include_toc = true;
        options.cover.title = "Stubbed".to_string();
        options.include_cover_page = true;

        let result = generate_from_markdown("# One\n\ntext", "pdf", &output, options);
        assert!(result.success, "error: {:?}", result.error);
        let bytes = fs::read(&output).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn pdf_page_count_comes_from_stub_utility() {
        let (_dir, stub) = write_stub_converter(
            "printf '%%PDF-1.7\\n%%%%EOF\\n' > \"$OUTPUT\"\nexit 0",
        );
        let info_dir = tempdir().unwrap();
        let info_stub = info_dir.path().join("fake-pdfinfo.sh");
        fs::write(&info_stub, "#!/bin/sh\necho 'Title: x'\necho 'Pages:          3'\nexit 0\n")
            .unwrap();
        let mut perms = fs::metadata(&info_stub).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&info_stub, perms).unwrap();

        let prev = std::env::var("SCRIV_PDFINFO_BIN").ok();
        std::env::set_var("SCRIV_PDFINFO_BIN", &info_stub);

        let output_dir = tempdir().unwrap();
        let output = output_dir.path().join("out.pdf");
        let result = generate_from_markdown("text", "pdf", &output, stub_options(&stub));

        if let Some(prev) = prev {
            std::env::set_var("SCRIV_PDFINFO_BIN", prev);
        } else {
            std::env::remove_var("SCRIV_PDFINFO_BIN");
        }

        assert!(result.success, "error: {:?}", result.error);
        assert_eq!(result.page_count, Some(3));
    }

    #[test]
    fn converter_failure_surfaces_stderr() {
        let (_dir, stub) = write_stub_converter("echo 'missing font package' >&2\nexit 2");
        let output_dir = tempdir().unwrap();
        let output = output_dir.path().join("out.pdf");

        let result = generate_from_markdown("text", "pdf", &output, stub_options(&stub));
        assert!(!result.success);
        let error = result.error.unwrap();
        assert!(error.contains("missing font package"), "got: {error}");
    }

    #[test]
    fn silent_converter_failure_reports_exit_code() {
        let (_dir, stub) = write_stub_converter("exit 3");
        let output_dir = tempdir().unwrap();
        let output = output_dir.path().join("out.pdf");

        let result = generate_from_markdown("text", "pdf", &output, stub_options(&stub));
        assert!(!result.success);
        assert!(result.error.unwrap().contains("exited with code 3"));
    }

    #[test]
    fn preview_rasterization_is_best_effort() {
        let dir = tempdir().unwrap();
        let pdf = dir.path().join("doc.pdf");
        fs::write(&pdf, "%PDF-1.7\n%%EOF\n").unwrap();

        // pdftoppm -singlefile writes "<prefix>.png"; the stub mimics that
        // by touching the path built from its last argument.
        let stub = dir.path().join("fake-pdftoppm.sh");
        fs::write(
            &stub,
            "#!/bin/sh\nfor arg in \"$@\"; do PREFIX=\"$arg\"; done\nprintf 'PNG' > \"$PREFIX.png\"\nexit 0\n",
        )
        .unwrap();
        let mut perms = fs::metadata(&stub).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&stub, perms).unwrap();

        let prev = std::env::var("SCRIV_PDFTOPPM_BIN").ok();
        std::env::set_var("SCRIV_PDFTOPPM_BIN", &stub);
        let preview = scriv_render::backends::rasterize_preview(&pdf);
        if let Some(prev) = prev {
            std::env::set_var("SCRIV_PDFTOPPM_BIN", prev);
        } else {
            std::env::remove_var("SCRIV_PDFTOPPM_BIN");
        }

        let preview = preview.expect("stub rasterizer must yield a preview path");
        assert_eq!(preview, dir.path().join("doc.png"));
        assert!(preview.exists());
    }

    #[test]
    fn slides_renderer_uses_converter_stub() {
        let (_dir, stub) = write_stub_converter("printf 'PK-stub' > \"$OUTPUT\"\nexit 0");
        let output_dir = tempdir().unwrap();
        let output = output_dir.path().join("deck.pptx");

        let mut options = stub_options(&stub);
        options.theme = Some("boardroom".to_string());

        let result = generate_from_markdown(
            "# Slide one\n\npoint\n\n# Slide two\n\nanother",
            "slides",
            &output,
            options,
        );
        assert!(result.success, "error: {:?}", result.error);
        assert!(output.exists());
        assert_eq!(result.page_count, None);
    }
}

use std::path::PathBuf;

use crate::project::ProjectContext;

/// `wasm-pack` arguments for the web crate.
pub fn wasm_pack_args(dev: bool, out_dir: Option<&PathBuf>) -> Vec<String> {
    let mut args = vec![
        "build".to_string(),
        "--target".to_string(),
        "web".to_string(),
        if dev { "--dev" } else { "--release" }.to_string(),
    ];
    if let Some(dir) = out_dir {
        args.push("--out-dir".to_string());
        args.push(dir.display().to_string());
    }
    args
}

pub async fn run(dev: bool, out_dir: Option<PathBuf>, ctx: ProjectContext) -> anyhow::Result<()> {
    let wasm_pack = which::which("wasm-pack").map_err(|_| {
        anyhow::anyhow!("wasm-pack not found on PATH. Install it with `cargo install wasm-pack`.")
    })?;
    let cwd = ctx.web_crate()?;
    let args = wasm_pack_args(dev, out_dir.as_ref());

    println!("Building tiltscenes-web in {}...", cwd.display());
    log::info!("{} {}", wasm_pack.display(), args.join(" "));

    let status = tokio::process::Command::new(&wasm_pack)
        .args(&args)
        .current_dir(&cwd)
        .stdin(std::process::Stdio::inherit())
        .stdout(std::process::Stdio::inherit())
        .stderr(std::process::Stdio::inherit())
        .status()
        .await?;

    anyhow::ensure!(status.success(), "wasm-pack failed with {status}");
    println!("Done.");
    Ok(())
}

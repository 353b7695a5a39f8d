use anyhow::Result;

pub fn update() -> Result<()> {
    let status = self_update::backends::github::Update::configure()
        .repo_owner("sitebox-cli")
        .repo_name("sitebox")
        .bin_name("sitebox")
        .show_download_progress(true)
        .current_version(env!("CARGO_PKG_VERSION"))
        .build()?
        .update()?;

    println!("Update status: `{}`!", status.version());
    Ok(())
}

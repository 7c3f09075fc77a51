use blueiris_rs::{Authentication, BlueIris, PTZ, PTZCommand};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 5 {
        println!("Usage: {} <URL> <Username> <Password> <Camera>", args[0]);
        return Ok(());
    }

    let url = &args[1];
    let user = &args[2];
    let pass = &args[3];
    let camera = &args[4];

    let mut bi = BlueIris::connect(url, user, pass).await?;
    if !bi.can_ptz() {
        println!("This login may not use PTZ.");
        bi.logout().await?;
        return Ok(());
    }

    println!("Performing PTZ operations on {}...", camera);

    // 1. Pan
    println!("Panning left...");
    bi.ptz(camera, PTZCommand::PanLeft).await?;
    tokio::time::sleep(Duration::from_millis(500)).await;

    println!("Panning right...");
    bi.ptz(camera, PTZCommand::PanRight).await?;
    tokio::time::sleep(Duration::from_millis(500)).await;

    // 2. Zoom
    println!("Zooming in...");
    bi.ptz(camera, PTZCommand::ZoomIn).await?;
    tokio::time::sleep(Duration::from_secs(1)).await;
    println!("Zooming out...");
    bi.ptz(camera, PTZCommand::ZoomOut).await?;

    // 3. Presets
    println!("Moving to preset 1...");
    bi.ptz(camera, PTZCommand::Preset1).await?;

    println!("Back home...");
    bi.ptz(camera, PTZCommand::from_input("home")?).await?;

    bi.logout().await?;
    println!("Done.");

    Ok(())
}

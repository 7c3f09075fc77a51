use blueiris_rs::{Authentication, BlueIris, Cameras, Status};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 4 {
        println!("Usage: {} <URL> <Username> <Password>", args[0]);
        println!("Example: cargo run --example status_summary -- http://192.168.1.10:81 admin pass123");
        return Ok(());
    }

    let url = &args[1];
    let user = &args[2];
    let pass = &args[3];

    // Logs in before returning
    println!("Logging in to {} as {}...", url, user);
    let mut bi = BlueIris::connect(url, user, pass).await?;
    println!("Connected to {} ({})", bi.system_name(), bi.version());

    println!("\n--- Status ---");
    match bi.active_profile().await {
        Ok(profile) => println!("Profile:  {}", profile),
        Err(e) => eprintln!("Error reading profile: {}", e),
    }
    match bi.active_signal().await {
        Ok(signal) => println!("Signal:   {}", signal),
        Err(e) => eprintln!("Error reading signal: {}", e),
    }
    match bi.active_schedule().await {
        Ok(schedule) => println!("Schedule: {}", schedule),
        Err(e) => eprintln!("Error reading schedule: {}", e),
    }

    println!("\n--- Cameras ---");
    for camera in bi.camera_list(false).await? {
        println!("{:<12} {}", camera.code, camera.name);
    }

    bi.logout().await?;
    println!("\nLogged out.");

    Ok(())
}

//! Minimal coordinator/client exchange — a record-get served over a
//! Unix domain socket control channel.
//!
//! Run with:
//!   cargo run --example control-channel

use std::fs;

use mgmtlink::dispatch::{
    extract_op_code, recv_message, recv_request, recv_response, send_request_stream,
    send_response,
};
use mgmtlink::frame::{FrameReader, FrameWriter};
use mgmtlink::marshal::FieldValue;
use mgmtlink::schema::OpCode;
use mgmtlink::transport::ControlSocket;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let sock_dir = std::env::temp_dir().join(format!("mgmtlink-demo-{}", std::process::id()));
    fs::create_dir_all(&sock_dir)?;
    let sock_path = sock_dir.join("mgmt.sock");

    let listener = ControlSocket::bind(&sock_path)?;
    eprintln!("Coordinator listening on {}", sock_path.display());

    // Coordinator: serve one request.
    let coordinator = std::thread::spawn(move || -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let stream = listener.accept()?;
        let mut reader = FrameReader::new(stream.try_clone()?);
        let mut writer = FrameWriter::new(stream);

        let payload = recv_message(&mut reader)?;
        let op = extract_op_code(&payload).ok_or("undefined operation")?;
        eprintln!("Coordinator received {op:?}");

        let fields = recv_request(&payload, op)?;
        let FieldValue::Str(name) = &fields[1] else {
            return Err("record name must be a string".into());
        };

        // ok, record-type=int, echoed name, raw record value
        send_response(
            &mut writer,
            op,
            &[
                FieldValue::Int(0),
                FieldValue::Int(1),
                FieldValue::from(name.clone()),
                FieldValue::from(8080i64.to_le_bytes().to_vec()),
            ],
        )?;
        Ok(())
    });

    // Administrative client: ask for a record.
    let stream = ControlSocket::connect(&sock_path)?;
    let mut reader = FrameReader::new(stream.try_clone()?);
    let mut writer = FrameWriter::new(stream);

    send_request_stream(
        &mut writer,
        OpCode::RecordGet,
        &[FieldValue::from("proxy.port")],
    )?;

    let payload = recv_message(&mut reader)?;
    let fields = recv_response(&payload, OpCode::RecordGet)?;
    eprintln!("Client received response: {fields:?}");

    coordinator.join().expect("coordinator panicked")?;
    let _ = fs::remove_dir_all(&sock_dir);
    Ok(())
}

//! End-to-end protocol properties: round-trips for every operation, the
//! measure/encode symmetry, bounds safety, and the documented scenarios.

use std::io::Cursor;

use bytes::BytesMut;

use mgmtlink_dispatch::{
    extract_op_code, recv_message, recv_request, recv_response, send_request,
    send_request_stream, send_response, DispatchError, WriteSender,
};
use mgmtlink_frame::{decode_frame, FrameReader, FrameWriter, DEFAULT_MAX_PAYLOAD, HEADER_SIZE};
use mgmtlink_marshal::{encode_to_vec, measure, FieldType, FieldValue};
use mgmtlink_schema::{registry, Direction, OpCode};
use mgmtlink_transport::ControlSocket;

/// One representative value per field type, exercising embedded zeros in
/// data payloads.
fn values_for(fields: &[FieldType]) -> Vec<FieldValue> {
    fields
        .iter()
        .enumerate()
        .map(|(i, f)| match f {
            FieldType::Int => FieldValue::Int(i as i64 - 1),
            FieldType::Str => FieldValue::from(format!("field-{i}")),
            FieldType::Data => FieldValue::from(vec![0u8, i as u8, 0, 255]),
        })
        .collect()
}

#[test]
fn every_request_roundtrips() {
    for op in OpCode::ALL {
        let schema = registry().lookup(Direction::Request, op).unwrap();
        let args = values_for(&schema.fields()[1..]);

        let mut sender = WriteSender::new(Vec::new());
        send_request(&mut sender, op, &args).unwrap();
        let wire = sender.into_inner();

        let payload = &wire[HEADER_SIZE..];
        assert_eq!(extract_op_code(payload), Some(op));

        let decoded = recv_request(payload, op).unwrap();
        assert_eq!(decoded[0], FieldValue::Int(op.code()));
        assert_eq!(&decoded[1..], args.as_slice());
    }
}

#[test]
fn every_response_roundtrips_or_is_a_no_reply() {
    for op in OpCode::ALL {
        let mut writer = FrameWriter::new(Vec::new());
        match registry().lookup(Direction::Response, op) {
            Ok(schema) => {
                let values = values_for(schema.fields());
                send_response(&mut writer, op, &values).unwrap();

                let mut wire = BytesMut::from(writer.into_inner().as_slice());
                let payload = decode_frame(&mut wire, DEFAULT_MAX_PAYLOAD)
                    .unwrap()
                    .unwrap();
                assert_eq!(recv_response(&payload, op).unwrap(), values);
            }
            Err(_) => {
                let err = send_response(&mut writer, op, &[]).unwrap_err();
                assert!(err.is_parameter_error(), "{op:?}");
                assert!(writer.into_inner().is_empty(), "{op:?} wrote bytes");
            }
        }
    }
}

#[test]
fn measure_matches_encode_for_every_schema() {
    for op in OpCode::ALL {
        for direction in [Direction::Request, Direction::Response] {
            let Ok(schema) = registry().lookup(direction, op) else {
                continue;
            };
            let values = values_for(schema.fields());
            let len = measure(schema.fields(), &values).unwrap();
            let encoded = encode_to_vec(schema.fields(), &values).unwrap();
            assert_eq!(encoded.len(), len, "{op:?} {direction:?}");
        }
    }
}

#[test]
fn truncated_response_fails_at_every_offset() {
    let schema = registry()
        .lookup(Direction::Response, OpCode::RecordGet)
        .unwrap();
    let values = values_for(schema.fields());
    let encoded = encode_to_vec(schema.fields(), &values).unwrap();

    for cut in 0..encoded.len() {
        let err = recv_response(&encoded[..cut], OpCode::RecordGet).unwrap_err();
        assert!(err.is_parameter_error(), "cut at {cut}");
    }
}

#[test]
fn ping_request_is_two_fixed_width_fields() {
    let mut sender = WriteSender::new(Vec::new());
    send_request(&mut sender, OpCode::Ping, &[FieldValue::Int(42)]).unwrap();

    let wire = sender.into_inner();
    assert_eq!(wire.len(), HEADER_SIZE + 16);

    let decoded = recv_request(&wire[HEADER_SIZE..], OpCode::Ping).unwrap();
    assert_eq!(
        decoded,
        vec![FieldValue::Int(OpCode::Ping.code()), FieldValue::Int(42)]
    );
}

#[test]
fn ping_has_no_reply() {
    let mut writer = FrameWriter::new(Vec::new());
    let err = send_response(&mut writer, OpCode::Ping, &[FieldValue::Int(0)]).unwrap_err();
    assert!(matches!(err, DispatchError::Schema(_)));
}

#[test]
fn record_get_scenario() {
    // Request: (record-get, "proxy.port")
    let mut sender = WriteSender::new(Vec::new());
    send_request(&mut sender, OpCode::RecordGet, &[FieldValue::from("proxy.port")]).unwrap();
    let wire = sender.into_inner();

    let decoded = recv_request(&wire[HEADER_SIZE..], OpCode::RecordGet).unwrap();
    assert_eq!(
        decoded,
        vec![
            FieldValue::Int(OpCode::RecordGet.code()),
            FieldValue::from("proxy.port"),
        ]
    );

    // Response: {ok, record-type, name, 4 raw bytes}
    let response = vec![
        FieldValue::Int(0),
        FieldValue::Int(2),
        FieldValue::from("proxy.port"),
        FieldValue::from(vec![0x1F, 0x90, 0x00, 0x00]),
    ];
    let mut writer = FrameWriter::new(Vec::new());
    send_response(&mut writer, OpCode::RecordGet, &response).unwrap();

    let mut framed = BytesMut::from(writer.into_inner().as_slice());
    let payload = decode_frame(&mut framed, DEFAULT_MAX_PAYLOAD).unwrap().unwrap();
    assert_eq!(recv_response(&payload, OpCode::RecordGet).unwrap(), response);
}

#[test]
fn truncated_frame_is_a_read_error_not_a_short_payload() {
    // Header declares 100 bytes; the stream ends after 3.
    let mut wire = Vec::new();
    wire.extend_from_slice(&100u32.to_le_bytes());
    wire.extend_from_slice(&[1, 2, 3]);

    let mut reader = FrameReader::new(Cursor::new(wire));
    let err = recv_message(&mut reader).unwrap_err();
    assert!(matches!(err, DispatchError::NetRead(_)));
    assert!(!err.is_parameter_error());
}

#[test]
fn unknown_operation_is_rejected_before_decode() {
    assert!(registry().lookup_raw(Direction::Request, 26).is_err());
    assert!(registry().lookup_raw(Direction::Request, -5).is_err());
    assert_eq!(extract_op_code(&1000i64.to_le_bytes()), None);
}

#[test]
fn request_response_exchange_over_control_socket() {
    let dir = std::env::temp_dir().join(format!("mgmtlink-dispatch-e2e-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let sock_path = dir.join("mgmt.sock");

    let listener = ControlSocket::bind(&sock_path).unwrap();

    // Managed side: read one request, classify, decode, reply.
    let server = std::thread::spawn(move || {
        let stream = listener.accept().unwrap();
        let mut reader = FrameReader::new(stream.try_clone().unwrap());
        let mut writer = FrameWriter::new(stream);

        let payload = recv_message(&mut reader).unwrap();
        let op = extract_op_code(&payload).unwrap();
        assert_eq!(op, OpCode::RecordSet);

        let fields = recv_request(&payload, op).unwrap();
        assert_eq!(fields[1], FieldValue::from("proxy.port"));
        assert_eq!(fields[2], FieldValue::from("8080"));

        send_response(
            &mut writer,
            op,
            &[FieldValue::Int(0), FieldValue::Int(1)],
        )
        .unwrap();
    });

    // Administrative client.
    let stream = ControlSocket::connect(&sock_path).unwrap();
    let mut reader = FrameReader::new(stream.try_clone().unwrap());
    let mut writer = FrameWriter::new(stream);

    send_request_stream(
        &mut writer,
        OpCode::RecordSet,
        &[FieldValue::from("proxy.port"), FieldValue::from("8080")],
    )
    .unwrap();

    let payload = recv_message(&mut reader).unwrap();
    let fields = recv_response(&payload, OpCode::RecordSet).unwrap();
    assert_eq!(fields, vec![FieldValue::Int(0), FieldValue::Int(1)]);

    server.join().unwrap();
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn both_send_shapes_produce_identical_wire_bytes() {
    let args = [FieldValue::Int(3), FieldValue::Int(60)];

    let mut sender = WriteSender::new(Vec::new());
    send_request(&mut sender, OpCode::Restart, &args[..1]).unwrap();

    let mut writer = FrameWriter::new(Vec::new());
    send_request_stream(&mut writer, OpCode::Restart, &args[..1]).unwrap();

    assert_eq!(sender.into_inner(), writer.into_inner());
}

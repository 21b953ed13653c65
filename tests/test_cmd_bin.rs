use std::process::Command;
use std::io::Write;

const INPUT: &str = r"
id, fecha, tipo_transaccion, cliente_id, monto
1, 2024-01-05 10:30:00, deposito, C1, 100.0
2, 2024-01-06 11:00:00, retiro, C1, 25.0
3, 2024-01-07 09:45:00, deposito, C2, 300.0
4, 2024-01-08 16:20:00, transferencia, C3, 80.0
5, 2024-01-09 12:00:00, deposito, C1, 15.0
";

fn write_input(content: &str) -> tempfile::NamedTempFile {
    let mut temp_file = tempfile::NamedTempFile::new()
        .expect("Failed to create temporary file");
    temp_file.write_all(content.trim_start().as_bytes())
        .expect("Failed to write to temporary file");
    temp_file
}

#[test]
fn test_transaction_charts_binary() {
    let bin_path = env!("CARGO_BIN_EXE_transaction_charts");
    let input = write_input(INPUT);
    let output_dir = tempfile::tempdir().expect("Failed to create output directory");

    let output = Command::new(bin_path)
        .arg(input.path())
        .arg("--output-dir")
        .arg(output_dir.path())
        .output()
        .expect("Failed to execute binary");

    assert!(output.status.success(),
        "Binary failed with stderr: {}",
        String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Dataset cargado: 5 registros"), "Unexpected output:\n{}", stdout);
    assert!(stdout.contains(r#"Columnas: ["id", "fecha", "tipo_transaccion", "cliente_id", "monto"]"#),
        "Unexpected output:\n{}", stdout);
    assert!(stdout.contains("(3 barras)"), "Unexpected output:\n{}", stdout);

    let by_type = std::fs::read_to_string(output_dir.path().join("transacciones_por_tipo.svg"))
        .expect("Type chart was not written");
    assert!(by_type.contains("transferencia"));

    let clients = std::fs::read_to_string(output_dir.path().join("top_clientes.svg"))
        .expect("Client chart was not written");
    assert!(clients.contains("Cliente ID"));
}

#[test]
fn test_missing_input_fails() {
    let bin_path = env!("CARGO_BIN_EXE_transaction_charts");
    let dir = tempfile::tempdir().expect("Failed to create temporary directory");

    let output = Command::new(bin_path)
        .arg(dir.path().join("transacciones_bancarias_limpio.csv"))
        .arg("--output-dir")
        .arg(dir.path())
        .output()
        .expect("Failed to execute binary");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("not found"));
}

#[test]
fn test_unparseable_date_fails() {
    let bin_path = env!("CARGO_BIN_EXE_transaction_charts");
    let input = write_input("fecha,tipo_transaccion,cliente_id\nmañana,deposito,C1\n");
    let output_dir = tempfile::tempdir().expect("Failed to create output directory");

    let output = Command::new(bin_path)
        .arg(input.path())
        .arg("--output-dir")
        .arg(output_dir.path())
        .output()
        .expect("Failed to execute binary");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("fecha"));
    assert!(!output_dir.path().join("transacciones_por_tipo.svg").exists());
}

pub fn to_string(data: &[u8]) -> String {
    return data.iter().map(|e| format!("{:02X}", e)).collect::<Vec<_>>().join(" ");
}

pub const CSS: &str = r#"
window {
    background: linear-gradient(135deg,
        rgba(17, 24, 39, 1.0),
        rgba(31, 41, 55, 1.0));
}
.container { padding: 28px 32px; }
.title {
    color: #ffffff;
    font-size: 22px;
    font-weight: 700;
}
.subtitle {
    color: rgba(255, 255, 255, 0.65);
    font-size: 13px;
}
.choose-btn {
    background: rgba(255, 255, 255, 0.08);
    border: 2px dashed rgba(255, 255, 255, 0.25);
    border-radius: 12px;
    color: #ffffff;
    padding: 14px;
}
.choose-btn:hover { border-color: rgba(96, 165, 250, 0.9); }
.upload-hint { color: rgba(255, 255, 255, 0.45); font-size: 11px; }
.file-name { color: rgba(255, 255, 255, 0.8); font-size: 13px; }
.predict-btn {
    background: #2563eb;
    border-radius: 10px;
    color: #ffffff;
    font-weight: 700;
    padding: 10px 28px;
    border: none;
    box-shadow: none;
}
.predict-btn:hover { background: #1d4ed8; }
.predict-btn:disabled { background: rgba(37, 99, 235, 0.4); color: rgba(255, 255, 255, 0.6); }
.error-box {
    background: rgba(220, 38, 38, 0.15);
    border: 1px solid rgba(248, 113, 113, 0.6);
    border-radius: 10px;
    padding: 12px;
}
.error-title { color: #fca5a5; font-weight: 700; }
.error-text { color: #fecaca; font-size: 13px; }
.result-box {
    background: rgba(255, 255, 255, 0.06);
    border-radius: 10px;
    padding: 12px;
}
.result-title { color: rgba(255, 255, 255, 0.8); font-size: 14px; font-weight: 600; }
.prediction-ai { color: #f87171; font-size: 28px; font-weight: 800; }
.prediction-human { color: #34d399; font-size: 28px; font-weight: 800; }
.footer { color: rgba(255, 255, 255, 0.35); font-size: 10px; }
"#;

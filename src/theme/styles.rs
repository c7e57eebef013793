//! Global CSS styles for the banking widgets.

pub const GLOBAL_STYLES: &str = r#"
/* === CSS Custom Properties === */
:root {
  /* Surfaces */
  --surface: #ffffff;
  --surface-muted: #f4f6f8;
  --border: #d7dde3;

  /* Brand */
  --brand: #0b5cab;
  --brand-hover: #084785;

  /* Text */
  --text-primary: #1d2730;
  --text-secondary: #4f5d6b;
  --text-muted: #8a96a3;

  /* Semantic */
  --danger: #c62839;
  --danger-bg: #fdecee;
  --success: #1d7a47;
  --success-bg: #e8f6ee;

  /* Typography */
  --font-sans: -apple-system, 'Segoe UI', Roboto, Helvetica, Arial, sans-serif;
  --text-sm: 0.875rem;
  --text-base: 1rem;
  --text-lg: 1.125rem;
  --text-xl: 1.5rem;

  /* Transitions */
  --transition-fast: 150ms ease;
}

/* === Global Reset === */
*, *::before, *::after {
  box-sizing: border-box;
  margin: 0;
  padding: 0;
}

html {
  font-size: 16px;
  -webkit-font-smoothing: antialiased;
}

body {
  font-family: var(--font-sans);
  background: var(--surface-muted);
  color: var(--text-primary);
  line-height: 1.5;
  min-height: 100vh;
}

/* === Layout === */
.app-shell {
  max-width: 520px;
  margin: 0 auto;
  padding: 1.5rem 1rem;
  display: flex;
  flex-direction: column;
  gap: 1.25rem;
}

.app-header h1 {
  font-size: var(--text-xl);
  font-weight: 600;
}

.widget-panel {
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: 8px;
  padding: 1.25rem;
}

.widget-title {
  font-size: var(--text-lg);
  font-weight: 600;
  margin-bottom: 1rem;
}

/* === Buttons === */
.btn-primary {
  padding: 0.6rem 1.5rem;
  background: var(--brand);
  border: 1px solid var(--brand);
  border-radius: 4px;
  color: #ffffff;
  font-size: var(--text-base);
  cursor: pointer;
  transition: background var(--transition-fast);
}

.btn-primary:hover:not(:disabled) {
  background: var(--brand-hover);
}

.btn-text {
  padding: 0.6rem 0.75rem;
  background: transparent;
  border: none;
  color: var(--brand);
  font-size: var(--text-base);
  cursor: pointer;
}

.btn-text.danger {
  color: var(--danger);
}

.btn-primary:disabled,
.btn-text:disabled {
  opacity: 0.5;
  cursor: not-allowed;
}

/* === Forms === */
.form-field {
  display: flex;
  flex-direction: column;
  gap: 0.25rem;
  margin-bottom: 0.875rem;
}

.input-label {
  font-size: var(--text-sm);
  color: var(--text-secondary);
}

.form-control {
  padding: 0.55rem 0.75rem;
  border: 1px solid var(--border);
  border-radius: 4px;
  font-size: var(--text-base);
  background: var(--surface);
  color: var(--text-primary);
}

.form-control:focus {
  outline: none;
  border-color: var(--brand);
}

.form-control.invalid {
  border-color: var(--danger);
}

.money-input-wrapper {
  display: flex;
  align-items: center;
  gap: 0.35rem;
}

.money-prefix {
  color: var(--text-secondary);
}

.deposit-input {
  flex: 1;
}

.form-actions {
  display: flex;
  align-items: center;
  gap: 0.5rem;
  margin-top: 0.5rem;
}

/* === Feedback === */
.alert {
  padding: 0.65rem 0.85rem;
  border-radius: 4px;
  font-size: var(--text-sm);
  margin-bottom: 1rem;
}

.alert-danger {
  background: var(--danger-bg);
  color: var(--danger);
}

.alert-success {
  background: var(--success-bg);
  color: var(--success);
}

.spinner-wrapper {
  display: inline-flex;
  align-items: center;
  gap: 0.4rem;
}

.spinner {
  width: 1em;
  height: 1em;
  border: 2px solid currentColor;
  border-right-color: transparent;
  border-radius: 50%;
  animation: spin 0.8s linear infinite;
}

@keyframes spin {
  to { transform: rotate(360deg); }
}

/* === Account Linking === */
.session-accounts {
  list-style: none;
  margin-top: 1rem;
  border-top: 1px solid var(--border);
}

.session-account {
  display: flex;
  align-items: center;
  justify-content: space-between;
  padding: 0.5rem 0;
  border-bottom: 1px solid var(--border);
}

.session-account-name {
  flex: 1;
}

.verify-account-name {
  font-size: var(--text-lg);
  margin-bottom: 0.35rem;
}

.verify-account-message {
  color: var(--text-secondary);
  font-size: var(--text-sm);
  margin-bottom: 1rem;
}

/* === Modal === */
.modal-overlay {
  position: fixed;
  inset: 0;
  background: rgba(18, 26, 33, 0.55);
  display: flex;
  align-items: center;
  justify-content: center;
  z-index: 100;
}

.modal-dialog {
  background: var(--surface);
  border-radius: 8px;
  width: min(440px, 92vw);
  max-height: 90vh;
  overflow-y: auto;
  box-shadow: 0 12px 40px rgba(0, 0, 0, 0.25);
}

.modal-title {
  font-size: var(--text-lg);
  font-weight: 600;
  padding: 1rem 1.25rem;
  border-bottom: 1px solid var(--border);
}

.modal-body {
  padding: 1.25rem;
}

/* === Scheduled Transfers === */
.scheduled-transfers {
  display: flex;
  flex-direction: column;
  gap: 0.75rem;
}

.transfers-placeholder {
  display: flex;
  align-items: center;
  gap: 0.5rem;
  font-size: var(--text-base);
  font-weight: 500;
  color: var(--text-muted);
}

.transfer-card {
  border: 1px solid var(--border);
  border-radius: 6px;
  padding: 0.75rem 1rem;
}

.transfer-card-header {
  font-weight: 600;
}

.transfer-card-body {
  color: var(--text-secondary);
}

.transfer-card-footer {
  font-size: var(--text-sm);
  color: var(--text-muted);
  margin-top: 0.25rem;
}
"#;

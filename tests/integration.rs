use bashgate::eval::Decision;

fn decision_for(command: &str) -> Decision {
    bashgate::evaluate(command).decision
}

fn reason_for(command: &str) -> String {
    bashgate::evaluate(command).reason
}

macro_rules! decision_test {
    ($name:ident, $cmd:expr, $decision:ident) => {
        #[test]
        fn $name() {
            assert_eq!(decision_for($cmd), Decision::$decision, "command: {}", $cmd,);
        }
    };
}

// ── ALLOW: approved read-only commands ──

decision_test!(allow_simple_ls, "ls -la", Allow);
decision_test!(allow_ls_relative, "ls src/parse", Allow);
decision_test!(allow_cat, "cat README.md", Allow);
decision_test!(allow_head, "head -20 src/main.rs", Allow);
decision_test!(allow_grep, "grep -r pattern src", Allow);
decision_test!(allow_rg, "rg 'fn main' src", Allow);
decision_test!(allow_find, "find . -name '*.rs'", Allow);
decision_test!(allow_echo, "echo hello world", Allow);
decision_test!(allow_printf, "printf '%s\\n' hello", Allow);
decision_test!(allow_pwd, "pwd", Allow);
decision_test!(allow_whoami, "whoami", Allow);
decision_test!(allow_uname, "uname -a", Allow);
decision_test!(allow_wc, "wc -l src/main.rs", Allow);
decision_test!(allow_which, "which cargo", Allow);
decision_test!(allow_diff, "diff a.txt b.txt", Allow);

// ── ALLOW: approved git and cargo subcommands ──

decision_test!(allow_git_status, "git status", Allow);
decision_test!(allow_git_log, "git log --oneline -10", Allow);
decision_test!(allow_git_diff, "git diff HEAD", Allow);
decision_test!(allow_cargo_build, "cargo build --release", Allow);
decision_test!(allow_cargo_test, "cargo test", Allow);
decision_test!(allow_cargo_fmt, "cargo fmt", Allow);

// ── ALLOW: compound forms built from approved commands ──

decision_test!(allow_pipeline, "cat file.txt | grep pattern", Allow);
decision_test!(allow_three_stage_pipeline, "cat file.txt | grep x | wc -l", Allow);
decision_test!(allow_and_list, "cargo fmt && cargo test", Allow);
decision_test!(allow_semi_list, "ls; pwd", Allow);
decision_test!(allow_subshell, "(ls && ls src)", Allow);
decision_test!(allow_local_redirect, "ls > out.txt", Allow);
decision_test!(allow_append_redirect, "echo done >> log.txt", Allow);
decision_test!(allow_fd_duplication, "cargo test 2>&1", Allow);
decision_test!(allow_workspace_mkdir, "mkdir build", Allow);

// ── ASK: unapproved programs ──

decision_test!(ask_unapproved_rm, "rm -rf tmp", Ask);
decision_test!(ask_unapproved_curl, "curl https://example.com", Ask);
decision_test!(ask_unapproved_sudo, "sudo apt install vim", Ask);
decision_test!(ask_git_push, "git push origin main", Ask);
decision_test!(ask_git_status_with_flag, "git status -s", Ask);
decision_test!(ask_cargo_publish, "cargo publish", Ask);

// ── ASK: execution-delegating flags defeat the approved pattern ──

decision_test!(ask_find_exec, "find . -name '*.rs' -exec rm -rf {} +", Ask);
decision_test!(ask_find_exec_in_list, "ls && find . -exec cat {} +", Ask);

// ── ASK: one bad member poisons the whole compound ──

decision_test!(ask_list_with_rm, "ls; rm -rf tmp", Ask);
decision_test!(ask_and_with_unknown, "ls && unknown-tool", Ask);
decision_test!(ask_pipeline_with_unknown, "cat file.txt | sed s/a/b/", Ask);
decision_test!(ask_group_with_unknown, "(ls && xyzzy)", Ask);

// ── ASK: structural risk ──

decision_test!(ask_background, "sleep 100 &", Ask);
decision_test!(ask_background_then_command, "sleep 100 & ls", Ask);
decision_test!(ask_background_then_semi, "sleep 100 & ; ls", Ask);
decision_test!(ask_variable_expansion, "echo $HOME", Ask);
decision_test!(ask_braced_expansion, "echo ${PATH}", Ask);
decision_test!(ask_command_substitution, "ls $(which cargo)", Ask);
decision_test!(ask_backtick_substitution, "echo `whoami`", Ask);
decision_test!(ask_quoted_substitution, "echo \"$(ls)\"", Ask);
decision_test!(ask_process_substitution, "diff <(sort a) <(sort b)", Ask);
decision_test!(ask_substitution_in_redirect, "ls > $(mktemp)", Ask);

// ── ASK: path safety ──

decision_test!(ask_absolute_path, "cat /etc/passwd", Ask);
decision_test!(ask_absolute_redirect, "ls > /tmp/out.txt", Ask);
decision_test!(ask_parent_traversal, "mkdir ../escape", Ask);
decision_test!(ask_hidden_traversal, "cat src/../../secret", Ask);
decision_test!(ask_quoted_traversal, "cat '../secret'", Ask);
decision_test!(ask_home_reference, "ls ~/projects", Ask);
decision_test!(ask_git_metadata, "cat .git/config", Ask);
decision_test!(ask_gitignore_write, "echo x > .gitignore", Ask);

// ── ASK: fail closed on unparseable input ──

decision_test!(ask_unterminated_quote, "echo 'oops", Ask);
decision_test!(ask_unterminated_subst, "echo $(ls", Ask);
decision_test!(ask_heredoc, "cat << EOF", Ask);
decision_test!(ask_case_statement, "case x in esac", Ask);
decision_test!(ask_trailing_and, "ls &&", Ask);

// ── ASK: control characters ──

decision_test!(ask_null_byte, "ls\0rm -rf tmp", Ask);
decision_test!(ask_escape_char, "ls \u{1b}[2K", Ask);
decision_test!(ask_literal_newline, "ls\nrm -rf tmp", Ask);
decision_test!(ask_ansi_c_newline, "echo $'x\\nrm -rf tmp'", Ask);
decision_test!(ask_hex_encoded_newline, "echo $'x\\x0arm -rf tmp'", Ask);
decision_test!(ask_octal_encoded_newline, "echo $'x\\012rm -rf tmp'", Ask);
decision_test!(ask_control_encoded_newline, "echo $'x\\cJrm -rf tmp'", Ask);

// ── DENY: structurally invalid input ──

decision_test!(deny_empty, "", Deny);
decision_test!(deny_whitespace_only, "   ", Deny);

// ── Reasons name the finding ──

#[test]
fn reason_names_unapproved_command() {
    let r = reason_for("ls; rm -rf tmp");
    assert!(r.contains("rm"), "{r}");
}

#[test]
fn reason_names_expanded_variable() {
    let r = reason_for("echo $HOME");
    assert!(r.contains("$HOME"), "{r}");
}

#[test]
fn reason_names_traversal_token() {
    let r = reason_for("mkdir ../escape");
    assert!(r.contains("../escape"), "{r}");
}

#[test]
fn reason_names_execution_flag() {
    let r = reason_for("find . -name '*.rs' -exec rm -rf {} +");
    assert!(r.contains("-exec"), "{r}");
}

#[test]
fn reason_flags_background_operator() {
    let r = reason_for("sleep 100 & ; ls");
    assert!(r.contains("backgrounded"), "{r}");
}

#[test]
fn reason_marks_unparseable_input() {
    let r = reason_for("echo 'oops");
    assert!(r.starts_with("unparseable command:"), "{r}");
}

// ── Properties ──

#[test]
fn verdicts_are_deterministic() {
    for cmd in ["ls -la", "ls; rm x", "echo $HOME", "echo 'oops"] {
        let a = bashgate::evaluate(cmd);
        let b = bashgate::evaluate(cmd);
        assert_eq!(a.decision, b.decision, "command: {cmd}");
        assert_eq!(a.reason, b.reason, "command: {cmd}");
    }
}

#[test]
fn augmentation_never_lowers_risk() {
    for (base, padded) in [
        ("rm -rf tmp", "ls && rm -rf tmp && pwd"),
        ("echo $HOME", "ls; echo $HOME; ls"),
        ("cat ../x", "pwd && cat ../x"),
    ] {
        assert!(
            decision_for(padded) >= decision_for(base),
            "padding {base} with approved commands lowered the verdict"
        );
    }
}

#[test]
fn ask_verdicts_always_carry_a_reason() {
    for cmd in [
        "rm -rf tmp",
        "echo $HOME",
        "ls $(pwd)",
        "sleep 1 &",
        "cat ../x",
        "cat /etc/passwd",
        "echo 'oops",
        "ls\0x",
    ] {
        let v = bashgate::evaluate(cmd);
        assert_eq!(v.decision, Decision::Ask, "command: {cmd}");
        assert!(!v.reason.is_empty(), "command: {cmd}");
    }
}

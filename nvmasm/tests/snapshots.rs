use nvmasm::assemble_with_debug;
use nvmasm::Assembly;

fn assemble(program_text: &str) -> Assembly {
    assemble_with_debug(program_text, "test").unwrap()
}

fn listing(assembly: &Assembly) -> String {
    assembly
        .debug
        .lines
        .iter()
        .map(|line| {
            let start = line.address as usize;
            let end = start + line.size as usize;
            let hex = assembly.bytes[start..end]
                .iter()
                .map(|b| format!("{:02X}", b))
                .collect::<Vec<_>>()
                .join(" ");
            format!("{:04X}  {}  {}", line.address, hex, line.text)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_countdown() {
    let program_text = include_str!("../programs/countdown.asm");
    let assembly = assemble(program_text);

    assert!(assembly.diagnostics.is_empty());
    assert_eq!(assembly.bytes.len(), 52);
    insta::assert_snapshot!(listing(&assembly), @r###"
    0004  02 00 00 00 0A  push 10
    0009  41 00  store 0
    000B  40 00  load 0
    000D  31 00 00 00 2B  jz done
    0012  40 00  load 0
    0014  02 00 00 00 30  push '0'
    0019  10  add
    001A  50 03  syscall write
    001C  40 00  load 0
    001E  02 00 00 00 01  push 1
    0023  11  sub
    0024  41 00  store 0
    0026  30 00 00 00 0B  jmp loop
    002B  33 00 00 00 31  call finish
    0030  00  hlt
    0031  50 00  syscall exit
    0033  34  ret
    "###);
}

#[test]
fn test_hello() {
    let program_text = include_str!("../programs/hello.asm");
    let assembly = assemble(program_text);

    let warnings = assembly
        .diagnostics
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>();
    assert_eq!(warnings, vec!["line 10: Unknown instruction 'frobnicate'"]);
    assert_eq!(assembly.symbols.resolve("start"), Some(4));
    assert_eq!(assembly.symbols.resolve("end"), Some(0x1F));

    insta::assert_snapshot!(listing(&assembly), @r###"
    0004  02 00 00 00 48  push 'H'
    0009  50 03  syscall 3
    000B  02 00 00 00 69  push 'i'
    0010  50 03  syscall write
    0012  02 00 00 00 21  push '!'
    0017  50 03  syscall write
    0019  30 00 00 00 1F  jmp end
    001E  01  nop
    001F  50 00  syscall exit
    "###);
}

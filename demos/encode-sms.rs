use smspdu::pdu::SmsSubmit;
use smspdu::pdu::address::Address;
use std::io::prelude::*;

fn main() {
    if let Err(e) = env_logger::init() {
        eprintln!("Failed to set up logging: {}", e);
    }
    println!("Input data in the form recipient;message");
    let stdin = ::std::io::stdin();
    let lock = stdin.lock();
    for ln in lock.lines() {
        let ln = ln.unwrap();
        let ln = ln.splitn(2, ';').collect::<Vec<_>>();
        if ln.len() != 2 {
            println!("Expected recipient;message");
            continue;
        }
        let recipient = match ln[0].parse::<Address>() {
            Ok(r) => r,
            Err(e) => {
                println!("Invalid recipient: {}", e);
                continue;
            }
        };
        println!("Recipient: {:?}", recipient);
        let msgs = match SmsSubmit::make_messages(recipient, ln[1]) {
            Ok(m) => m,
            Err(e) => {
                println!("Failed to make messages: {}", e);
                continue;
            }
        };
        for msg in msgs {
            println!("PDU: {:?}", msg);
            let encoded = msg.encode().unwrap();
            assert_eq!(SmsSubmit::decode(&encoded).unwrap(), msg);
            println!("Encoded PDU (length {}): {}", msg.tpdu_len().unwrap(), encoded);
        }
    }
}

#[macro_use] extern crate log;

use smspdu::pdu::{MessageType, SmsDeliver, SmsSubmit};
use smspdu::pdu::user_data::{Content, UserData};
use smspdu::util::HexData;
use smspdu::PduResult;
use std::io::prelude::*;

fn print_user_data(ud: &UserData) {
    if let Some(ref h) = ud.header {
        println!("User data header: {:?}", h);
        if let Some(c) = h.concatenated_sms() {
            println!("Part {} of {} (reference {})", c.sequence, c.parts, c.reference);
        }
    }
    match ud.content {
        Content::Text(ref t) => println!("Text: {}", t),
        Content::Binary(ref b) => println!("Data: {}", HexData(b))
    }
}
fn decode(line: &str) -> PduResult<()> {
    match SmsDeliver::decode(line) {
        Ok(ref sms) if sms.header.message_type == MessageType::Deliver => {
            debug!("PDU: {:?}", sms);
            println!("{}", sms);
            print_user_data(&sms.user_data);
            return Ok(());
        },
        Ok(_) => debug!("not an SMS-DELIVER, trying SMS-SUBMIT"),
        Err(e) => debug!("not an SMS-DELIVER ({}), trying SMS-SUBMIT", e)
    }
    let sms = SmsSubmit::decode(line)?;
    debug!("PDU: {:?}", sms);
    println!("{}", sms);
    if let Some(ref vp) = sms.validity_period {
        println!("Validity period: {:?}", vp);
    }
    print_user_data(&sms.user_data);
    Ok(())
}
fn main() {
    if let Err(e) = env_logger::init() {
        eprintln!("Failed to set up logging: {}", e);
    }
    println!("Input PDUs, one per line");
    let stdin = ::std::io::stdin();
    let lock = stdin.lock();
    for ln in lock.lines() {
        let ln = match ln {
            Ok(l) => l,
            Err(e) => {
                error!("Failed to read stdin: {}", e);
                break;
            }
        };
        let ln = ln.trim();
        if ln.is_empty() {
            continue;
        }
        if let Err(e) = decode(ln) {
            println!("Decode failed: {}", e);
        }
    }
}

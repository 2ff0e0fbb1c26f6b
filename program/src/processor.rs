use crate::instruction::UmayInstruction;
use crate::instructions::{
    create_pool, deposit_usdt, finalize, initialize_factory, invest, redeem_by_scenario, refund,
    release_to_company, set_fail_payout_active, set_success_payout_active,
};
use solana_program::{account_info::AccountInfo, entrypoint::ProgramResult, pubkey::Pubkey};

pub fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    let instruction = UmayInstruction::unpack(instruction_data)?;
    match instruction {
        UmayInstruction::InitializeFactory { admin, usdt_mint } => {
            initialize_factory(program_id, accounts, admin, usdt_mint)
        }
        UmayInstruction::CreatePool(params) => create_pool(program_id, accounts, &params),
        UmayInstruction::Invest { amount } => invest(program_id, accounts, amount),
        UmayInstruction::Finalize => finalize(program_id, accounts),
        UmayInstruction::ReleaseToCompany => release_to_company(program_id, accounts),
        UmayInstruction::Refund => refund(program_id, accounts),
        UmayInstruction::DepositUsdt { amount } => deposit_usdt(program_id, accounts, amount),
        UmayInstruction::SetSuccessPayoutActive { active } => {
            set_success_payout_active(program_id, accounts, active)
        }
        UmayInstruction::SetFailPayoutActive { active } => {
            set_fail_payout_active(program_id, accounts, active)
        }
        UmayInstruction::RedeemByScenario {
            scenario,
            token_amount,
        } => redeem_by_scenario(program_id, accounts, scenario, token_amount),
    }
}
